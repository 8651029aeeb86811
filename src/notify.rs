use crate::difficulty::DifficultyProfile;
use crate::medal::MedalResult;

/// Presentation boundary. The session calls these after each state change;
/// implementations render, play cues or record. Every method defaults to a no-op.
pub trait Notifier {
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_time_changed(&mut self, _remaining_secs: u32) {}
    fn on_round_started(&mut self) {}
    fn on_round_ended(&mut self, _final_score: u32, _medal: &MedalResult, _best_score: u32) {}
    fn on_round_reset(&mut self, _selected_duration: u32) {}
    /// Fired whenever the selected duration changes, and once when the session is created.
    fn on_profile_rendered(&mut self, _profile: &DifficultyProfile) {}
}

/// Discards every notification.
impl Notifier for () {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ScoreChanged(u32),
    TimeChanged(u32),
    RoundStarted,
    RoundEnded {
        final_score: u32,
        medal: MedalResult,
        best_score: u32,
    },
    RoundReset(u32),
    ProfileRendered(DifficultyProfile),
}

/// Keeps every notification in order; handy for headless checks.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    pub events: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.events)
    }
}

impl Notifier for RecordingNotifier {
    fn on_score_changed(&mut self, score: u32) {
        self.events.push(Notification::ScoreChanged(score));
    }

    fn on_time_changed(&mut self, remaining_secs: u32) {
        self.events.push(Notification::TimeChanged(remaining_secs));
    }

    fn on_round_started(&mut self) {
        self.events.push(Notification::RoundStarted);
    }

    fn on_round_ended(&mut self, final_score: u32, medal: &MedalResult, best_score: u32) {
        self.events.push(Notification::RoundEnded {
            final_score,
            medal: *medal,
            best_score,
        });
    }

    fn on_round_reset(&mut self, selected_duration: u32) {
        self.events.push(Notification::RoundReset(selected_duration));
    }

    fn on_profile_rendered(&mut self, profile: &DifficultyProfile) {
        self.events.push(Notification::ProfileRendered(*profile));
    }
}
