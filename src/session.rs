use log::{debug, info, trace};

use crate::best_score::BestScoreStore;
use crate::difficulty::{DifficultyCatalog, DifficultyProfile};
use crate::error::ConfigError;
use crate::medal::{judge, MedalResult};
use crate::notify::Notifier;
use crate::timer::{TickHandle, TickId, TickScheduler, TICK_PERIOD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    pub score: u32,
    pub remaining_secs: u32,
    pub selected_duration: u32,
}

impl SessionState {
    fn idle(duration: u32) -> Self {
        Self {
            phase: Phase::Idle,
            score: 0,
            remaining_secs: duration,
            selected_duration: duration,
        }
    }
}

/// Outcome of the last finished round, cleared when a new round starts or the session resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub final_score: u32,
    pub medal: MedalResult,
    pub best_score: u32,
    pub new_record: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click began a round; it does not score.
    Started,
    Scored(u32),
    /// The round is over, the click was dropped.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyChange {
    Applied,
    /// A round is running; the selection was left untouched.
    Locked,
}

/// Owns one game: the round state, its countdown timer and the best score.
///
/// Every input is processed to completion before the next one; the countdown timer
/// exists only while the phase is [`Phase::Running`].
pub struct Session<S: TickScheduler, B: BestScoreStore, N: Notifier> {
    catalog: DifficultyCatalog,
    profile: DifficultyProfile,
    state: SessionState,
    scheduler: S,
    timer: Option<S::Handle>,
    store: B,
    best_score: u32,
    last_result: Option<RoundResult>,
    notifier: N,
}

impl<S: TickScheduler, B: BestScoreStore, N: Notifier> Session<S, B, N> {
    pub fn new(
        catalog: DifficultyCatalog,
        initial_duration: u32,
        scheduler: S,
        store: B,
        mut notifier: N,
    ) -> Result<Self, ConfigError> {
        let profile = catalog.lookup(initial_duration)?;
        let best_score = store.load();

        notifier.on_profile_rendered(&profile);
        notifier.on_score_changed(0);
        notifier.on_time_changed(initial_duration);

        Ok(Self {
            catalog,
            profile,
            state: SessionState::idle(initial_duration),
            scheduler,
            timer: None,
            store,
            best_score,
            last_result: None,
            notifier,
        })
    }

    pub fn click(&mut self) -> ClickOutcome {
        match self.state.phase {
            Phase::Idle => {
                self.start_round();
                ClickOutcome::Started
            }
            Phase::Running => {
                self.state.score += 1;
                self.notifier.on_score_changed(self.state.score);
                ClickOutcome::Scored(self.state.score)
            }
            Phase::Ended => {
                trace!("click ignored, round already ended");
                ClickOutcome::Ignored
            }
        }
    }

    /// Advance the countdown by one second. Ticks from a timer other than the
    /// active one are stale and ignored; returns whether the tick was applied.
    pub fn on_tick(&mut self, id: TickId) -> bool {
        let active = self.timer.as_ref().map(|t| t.id());
        if self.state.phase != Phase::Running || active != Some(id) {
            trace!("dropping stale tick {id:?}");
            return false;
        }

        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        self.notifier.on_time_changed(self.state.remaining_secs);

        if self.state.remaining_secs == 0 {
            self.finish_round();
        }
        true
    }

    /// Switch to another difficulty. Unknown durations are an error even while a
    /// round is running; a known one is only applied outside a running round.
    pub fn select_difficulty(&mut self, duration_secs: u32) -> Result<DifficultyChange, ConfigError> {
        let profile = self.catalog.lookup(duration_secs)?;
        if self.state.phase == Phase::Running {
            debug!("difficulty locked during a round, ignoring {duration_secs}s");
            return Ok(DifficultyChange::Locked);
        }

        self.profile = profile;
        self.enter_idle(duration_secs);
        debug!("selected {duration_secs}s difficulty");

        self.notifier.on_profile_rendered(&self.profile);
        self.notifier.on_score_changed(0);
        self.notifier.on_time_changed(self.state.remaining_secs);
        Ok(DifficultyChange::Applied)
    }

    pub fn reset(&mut self) {
        self.stop_timer();
        self.enter_idle(self.state.selected_duration);
        debug!("session reset");

        self.notifier.on_round_reset(self.state.selected_duration);
        self.notifier.on_profile_rendered(&self.profile);
        self.notifier.on_score_changed(0);
        self.notifier.on_time_changed(self.state.remaining_secs);
    }

    fn start_round(&mut self) {
        self.state.phase = Phase::Running;
        self.state.score = 0;
        self.state.remaining_secs = self.state.selected_duration;
        self.last_result = None;
        self.timer = Some(self.scheduler.schedule(TICK_PERIOD));
        debug!("round started ({}s)", self.state.selected_duration);

        self.notifier.on_round_started();
    }

    fn finish_round(&mut self) {
        self.stop_timer();
        self.state.phase = Phase::Ended;

        let score = self.state.score;
        let update = self.store.record_if_higher(score);
        self.best_score = update.best;
        let medal = judge(score, &self.profile);
        self.last_result = Some(RoundResult {
            final_score: score,
            medal,
            best_score: update.best,
            new_record: update.updated,
        });
        info!(
            "round over: {score} clicks in {}s, {} medal{}",
            self.state.selected_duration,
            medal.tier,
            if update.updated { ", new best" } else { "" }
        );

        self.notifier.on_round_ended(score, &medal, update.best);
    }

    fn enter_idle(&mut self, duration_secs: u32) {
        self.state = SessionState::idle(duration_secs);
        self.last_result = None;
    }

    fn stop_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.remaining_secs
    }

    pub fn selected_duration(&self) -> u32 {
        self.state.selected_duration
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn catalog(&self) -> &DifficultyCatalog {
        &self.catalog
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    pub fn active_timer(&self) -> Option<TickId> {
        self.timer.as_ref().map(|t| t.id())
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}
