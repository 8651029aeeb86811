use log::trace;

use crate::celebration::CelebrationAnimation;
use crate::difficulty::DifficultyProfile;
use crate::medal::{MedalResult, Tier};
use crate::notify::Notifier;
use crate::sound::{Beeper, Cue};

/// Text shown after a round ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBanner {
    pub tier: Tier,
    pub title: String,
    pub text: String,
}

impl ResultBanner {
    pub fn new(final_score: u32, medal: &MedalResult) -> Self {
        let title = match medal.tier {
            Tier::Gold => "Gold medal!",
            Tier::Silver => "Silver medal!",
            Tier::Bronze => "Bronze medal!",
            Tier::None => "No medal...",
        }
        .to_string();
        let text = match medal.next_target {
            None => format!("Result: {final_score} clicks! Top rank achieved!"),
            Some(next) => format!("Result: {final_score} clicks! Next time aim for {next}!"),
        };
        Self {
            tier: medal.tier,
            title,
            text,
        }
    }
}

/// Display model driven by session notifications: what the screen shows,
/// which cues play and when confetti flies.
#[derive(Debug)]
pub struct Presenter<B: Beeper> {
    pub score: u32,
    pub remaining_secs: u32,
    pub best_score: u32,
    pub profile: Option<DifficultyProfile>,
    pub banner: Option<ResultBanner>,
    pub new_record: bool,
    pub celebration: CelebrationAnimation,
    pub sound_enabled: bool,
    viewport: (u16, u16),
    beeper: B,
}

impl<B: Beeper> Presenter<B> {
    pub fn new(beeper: B, sound_enabled: bool, best_score: u32) -> Self {
        Self {
            score: 0,
            remaining_secs: 0,
            best_score,
            profile: None,
            banner: None,
            new_record: false,
            celebration: CelebrationAnimation::new(),
            sound_enabled,
            viewport: (80, 24),
            beeper,
        }
    }

    /// Area the confetti is thrown across.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    pub fn beeper(&self) -> &B {
        &self.beeper
    }

    fn cue(&mut self, cue: Cue) {
        if !self.sound_enabled {
            return;
        }
        let (freq, ms) = cue.tone();
        trace!("cue {cue}: {freq}Hz for {ms}ms");
        self.beeper.beep(cue);
    }

    fn clear_result(&mut self) {
        self.banner = None;
        self.new_record = false;
        self.celebration.clear();
    }
}

impl<B: Beeper> Notifier for Presenter<B> {
    fn on_score_changed(&mut self, score: u32) {
        // Reset and difficulty changes also report a zero score; only real clicks beep.
        if score > self.score {
            self.cue(Cue::Click);
        }
        self.score = score;
    }

    fn on_time_changed(&mut self, remaining_secs: u32) {
        self.remaining_secs = remaining_secs;
    }

    fn on_round_started(&mut self) {
        self.clear_result();
        self.cue(Cue::Start);
    }

    fn on_round_ended(&mut self, final_score: u32, medal: &MedalResult, best_score: u32) {
        self.score = final_score;
        self.new_record = best_score > self.best_score;
        self.best_score = best_score;
        self.banner = Some(ResultBanner::new(final_score, medal));
        let (w, h) = self.viewport;
        self.celebration.burst(medal.tier, w, h);
        self.cue(Cue::End);
    }

    fn on_round_reset(&mut self, _selected_duration: u32) {
        self.clear_result();
        self.cue(Cue::Reset);
    }

    fn on_profile_rendered(&mut self, profile: &DifficultyProfile) {
        self.profile = Some(*profile);
        self.clear_result();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyCatalog;
    use crate::medal::judge;
    use crate::sound::RecordingBeeper;

    fn presenter(sound: bool) -> Presenter<RecordingBeeper> {
        Presenter::new(RecordingBeeper::default(), sound, 10)
    }

    #[test]
    fn banner_text_for_each_outcome() {
        let p = DifficultyCatalog::standard().lookup(5).unwrap();
        let b = ResultBanner::new(25, &judge(25, &p));
        assert_eq!(b.title, "Bronze medal!");
        assert_eq!(b.text, "Result: 25 clicks! Next time aim for 30!");

        let b = ResultBanner::new(41, &judge(41, &p));
        assert_eq!(b.title, "Gold medal!");
        assert_eq!(b.text, "Result: 41 clicks! Top rank achieved!");

        let b = ResultBanner::new(3, &judge(3, &p));
        assert_eq!(b.tier, Tier::None);
        assert!(b.text.ends_with("aim for 20!"));
    }

    #[test]
    fn cues_follow_round_lifecycle() {
        let mut p = presenter(true);
        p.on_round_started();
        p.on_score_changed(1);
        p.on_score_changed(2);
        p.on_time_changed(0);
        let medal = MedalResult {
            tier: Tier::None,
            next_target: Some(20),
        };
        p.on_round_ended(2, &medal, 10);
        p.on_round_reset(5);
        p.on_score_changed(0);
        assert_eq!(
            p.beeper().played,
            vec![Cue::Start, Cue::Click, Cue::Click, Cue::End, Cue::Reset]
        );
    }

    #[test]
    fn muted_presenter_stays_quiet() {
        let mut p = presenter(false);
        p.on_round_started();
        p.on_score_changed(1);
        assert!(p.beeper().played.is_empty());
        assert!(p.toggle_sound());
        p.on_score_changed(2);
        assert_eq!(p.beeper().played, vec![Cue::Click]);
    }

    #[test]
    fn round_end_shows_banner_and_confetti() {
        let mut p = presenter(false);
        p.set_viewport(60, 20);
        let medal = MedalResult {
            tier: Tier::Silver,
            next_target: Some(80),
        };
        p.on_round_ended(65, &medal, 65);
        assert!(p.new_record);
        assert_eq!(p.best_score, 65);
        assert_eq!(p.banner.as_ref().unwrap().title, "Silver medal!");
        assert!(p.celebration.is_active);
        assert_eq!(p.celebration.width, 60.0);

        p.on_round_reset(10);
        assert!(p.banner.is_none());
        assert!(!p.new_record);
        assert!(!p.celebration.is_active);
    }
}
