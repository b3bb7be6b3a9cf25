//! Per-run session record: clock, countdown, taps, goal and multiplier
//!
//! Only [`Session`]'s own methods and the [`SessionEffects`] impl mutate it.

use super::effects::SessionEffects;
use super::state::{GameEvent, GameMode, SessionPhase, display_seconds};
use super::timers::{TimerId, Timers};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTimer {
    Unfreeze,
    RevertMultiplier,
}

/// Session state for one run
#[derive(Debug, Clone)]
pub struct Session {
    mode: GameMode,
    phase: SessionPhase,
    time_remaining: f32,
    frozen: bool,
    goal: u32,
    overall_goal: u32,
    total_taps: u32,
    tap_multiplier: u32,
    /// Seconds since the current run was set up; back to 0 on every reset
    now: f32,
    timers: Timers<SessionTimer>,
    pending_unfreeze: Option<TimerId>,
    pending_revert: Option<TimerId>,
    shown_seconds: u32,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            mode: GameMode::default(),
            phase: SessionPhase::Menu,
            time_remaining: tuning.session_start_time,
            frozen: false,
            goal: tuning.first_goal,
            overall_goal: tuning.overall_goal,
            total_taps: 0,
            tap_multiplier: 1,
            now: 0.0,
            timers: Timers::new(),
            pending_unfreeze: None,
            pending_revert: None,
            shown_seconds: display_seconds(tuning.session_start_time),
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn overall_goal(&self) -> u32 {
        self.overall_goal
    }

    pub fn tap_multiplier(&self) -> u32 {
        self.tap_multiplier
    }

    /// Back to default values for `mode`. Cancels the pending unfreeze and
    /// multiplier revert and rebases the clock to 0, so any other deadline
    /// scheduled against the old clock must be dropped too. Phase is left to
    /// the caller.
    pub(crate) fn reset(&mut self, mode: GameMode, tuning: &Tuning) {
        self.timers.clear();
        self.pending_unfreeze = None;
        self.pending_revert = None;
        self.now = 0.0;

        self.mode = mode;
        self.time_remaining = tuning.session_start_time;
        self.goal = tuning.first_goal;
        self.overall_goal = tuning.overall_goal;
        self.total_taps = 0;

        if self.frozen {
            self.frozen = false;
            self.emit(GameEvent::FreezeChanged { frozen: false });
        }
        if self.tap_multiplier != 1 {
            self.tap_multiplier = 1;
            self.emit(GameEvent::MultiplierChanged { factor: 1 });
        }

        self.shown_seconds = display_seconds(self.time_remaining);
        self.emit(GameEvent::TimerChanged {
            seconds: self.shown_seconds,
        });
        self.emit(GameEvent::GoalChanged { goal: self.goal });
        self.emit(GameEvent::TapCountChanged { total: 0 });
    }

    pub(crate) fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }

    /// Move the clock forward and run due auto-unfreeze / multiplier revert
    pub(crate) fn advance_clock(&mut self, dt: f32) {
        self.now += dt;

        while let Some((id, action)) = self.timers.pop_due(self.now) {
            match action {
                SessionTimer::Unfreeze => {
                    if self.pending_unfreeze == Some(id) {
                        self.pending_unfreeze = None;
                    }
                    log::debug!("Freeze expired at {:.2}s", self.now);
                    self.set_frozen(false);
                }
                SessionTimer::RevertMultiplier => {
                    if self.pending_revert == Some(id) {
                        self.pending_revert = None;
                    }
                    self.set_multiplier(1);
                }
            }
        }
    }

    /// Countdown step. Returns true when the clock has run out.
    pub(crate) fn decay(&mut self, dt: f32) -> bool {
        if self.phase != SessionPhase::Active || self.frozen {
            return false;
        }
        self.time_remaining = (self.time_remaining - dt).max(0.0);
        self.refresh_timer_display();
        self.time_remaining <= 0.0
    }

    /// Count one tap at the current multiplier
    pub(crate) fn register_tap(&mut self) -> u32 {
        self.total_taps += self.tap_multiplier;
        self.emit(GameEvent::TapCountChanged {
            total: self.total_taps,
        });
        self.total_taps
    }

    pub(crate) fn raise_goal(&mut self, step: u32) {
        self.goal += step;
        self.emit(GameEvent::GoalChanged { goal: self.goal });
    }

    pub(crate) fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_frozen(&mut self, frozen: bool) {
        if self.frozen != frozen {
            self.frozen = frozen;
            self.emit(GameEvent::FreezeChanged { frozen });
        }
    }

    fn set_multiplier(&mut self, factor: u32) {
        if self.tap_multiplier != factor {
            self.tap_multiplier = factor;
            self.emit(GameEvent::MultiplierChanged { factor });
        }
    }

    fn refresh_timer_display(&mut self) {
        let seconds = display_seconds(self.time_remaining);
        if seconds != self.shown_seconds {
            self.shown_seconds = seconds;
            self.emit(GameEvent::TimerChanged { seconds });
        }
    }
}

impl SessionEffects for Session {
    fn now(&self) -> f32 {
        self.now
    }

    fn mode(&self) -> GameMode {
        self.mode
    }

    fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    fn total_taps(&self) -> u32 {
        self.total_taps
    }

    fn boost_multiplier(&mut self, factor: u32, duration: f32) {
        if let Some(id) = self.pending_revert.take() {
            self.timers.cancel(id);
        }
        self.set_multiplier(factor.max(1));
        self.pending_revert = Some(self.timers.schedule(
            self.now,
            duration,
            SessionTimer::RevertMultiplier,
        ));
    }

    fn freeze_timer(&mut self, duration: Option<f32>) {
        if let Some(id) = self.pending_unfreeze.take() {
            self.timers.cancel(id);
        }
        self.set_frozen(true);
        if let Some(duration) = duration {
            self.pending_unfreeze =
                Some(self.timers.schedule(self.now, duration, SessionTimer::Unfreeze));
        }
    }

    fn unfreeze_timer(&mut self) {
        if let Some(id) = self.pending_unfreeze.take() {
            self.timers.cancel(id);
        }
        self.set_frozen(false);
    }

    fn reduce_timer(&mut self, amount: f32) {
        self.time_remaining = (self.time_remaining - amount).max(0.0);
        self.refresh_timer_display();
    }

    fn add_time(&mut self, amount: f32) {
        self.time_remaining = (self.time_remaining + amount).max(0.0);
        self.refresh_timer_display();
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
