//! Timed tap-goal challenges layered on an Endless run
//!
//! A challenge triggers every `challenge_interval` seconds or `tap_interval`
//! taps, whichever comes first. While it runs the session timer is frozen and
//! power-ups are cleared and suppressed. Beating it adds time; running out of
//! time ends the whole run.

use super::effects::SessionEffects;
use super::powerups::PowerUpSpawner;
use super::state::{GameEvent, GameMode};
use crate::audio::SoundEffect;
use crate::tuning::Tuning;

/// Challenge progress plus the baseline for the next trigger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChallengeState {
    pub active: bool,
    pub goal: u32,
    pub time_left: f32,
    pub current_taps: u32,
    /// Session clock when the last challenge started (or the run began)
    pub last_trigger_time: f32,
    /// Session tap total at that moment
    pub last_trigger_taps: u32,
}

/// How a challenge ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeOutcome {
    Succeeded,
    /// Fatal to the run; the caller must end the session
    Failed,
}

#[derive(Debug, Clone)]
pub struct ChallengeEngine {
    state: ChallengeState,
    interval: f32,
    tap_interval: u32,
    default_goal: u32,
    default_time: f32,
    reward: f32,
}

impl ChallengeEngine {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            state: ChallengeState::default(),
            interval: tuning.challenge_interval,
            tap_interval: tuning.tap_interval,
            default_goal: tuning.default_challenge_goal,
            default_time: tuning.default_challenge_time,
            reward: tuning.challenge_reward,
        }
    }

    pub fn state(&self) -> &ChallengeState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Per-tick step: count down a running challenge, otherwise check whether
    /// one is due
    pub fn update(
        &mut self,
        dt: f32,
        fx: &mut impl SessionEffects,
        spawner: &mut PowerUpSpawner,
    ) -> Option<ChallengeOutcome> {
        if !self.state.active {
            self.check_trigger(fx, spawner);
            return None;
        }

        self.state.time_left = (self.state.time_left - dt).max(0.0);
        fx.emit(GameEvent::ChallengeTimer {
            time_left: self.state.time_left,
        });

        if self.state.time_left <= 0.0 {
            self.finish(false, fx, spawner);
            return Some(ChallengeOutcome::Failed);
        }
        None
    }

    /// Start a default challenge if the session is an active Endless run and
    /// the time or tap interval has elapsed. Returns true if one started.
    pub fn check_trigger(
        &mut self,
        fx: &mut impl SessionEffects,
        spawner: &mut PowerUpSpawner,
    ) -> bool {
        if self.state.active || !fx.is_active() || fx.mode() != GameMode::Endless {
            return false;
        }

        let elapsed = fx.now() - self.state.last_trigger_time;
        let taps = fx.total_taps().saturating_sub(self.state.last_trigger_taps);
        if elapsed >= self.interval || taps >= self.tap_interval {
            self.start_challenge(self.default_goal, self.default_time, fx, spawner);
            return true;
        }
        false
    }

    pub fn start_challenge(
        &mut self,
        goal: u32,
        time_limit: f32,
        fx: &mut impl SessionEffects,
        spawner: &mut PowerUpSpawner,
    ) {
        spawner.set_suppressed(true);
        spawner.hide_all(fx);

        self.state.active = true;
        self.state.goal = goal;
        self.state.time_left = time_limit;
        self.state.current_taps = 0;

        fx.freeze_timer(None);

        self.state.last_trigger_time = fx.now();
        self.state.last_trigger_taps = fx.total_taps();

        log::info!("Challenge started: {} taps in {:.1}s", goal, time_limit);
        fx.emit(GameEvent::ChallengeStarted { goal, time_limit });
        fx.emit(GameEvent::ChallengeProgress { taps: 0, goal });
    }

    /// Count a tap toward the running challenge
    pub fn on_tap(
        &mut self,
        fx: &mut impl SessionEffects,
        spawner: &mut PowerUpSpawner,
    ) -> Option<ChallengeOutcome> {
        if !self.state.active {
            return None;
        }

        self.state.current_taps += 1;
        fx.emit(GameEvent::ChallengeProgress {
            taps: self.state.current_taps,
            goal: self.state.goal,
        });

        if self.state.current_taps >= self.state.goal {
            self.finish(true, fx, spawner);
            return Some(ChallengeOutcome::Succeeded);
        }
        None
    }

    /// Drop any running challenge and restart the trigger intervals from now
    pub fn reset(&mut self, fx: &mut impl SessionEffects, spawner: &mut PowerUpSpawner) {
        self.state = ChallengeState {
            last_trigger_time: fx.now(),
            ..ChallengeState::default()
        };

        fx.unfreeze_timer();
        spawner.set_suppressed(false);
        spawner.hide_all(fx);
    }

    fn finish(&mut self, success: bool, fx: &mut impl SessionEffects, spawner: &mut PowerUpSpawner) {
        self.state.active = false;
        spawner.set_suppressed(false);

        if success {
            log::info!("Challenge complete, +{}s", self.reward);
            fx.add_time(self.reward);
            fx.unfreeze_timer();
            fx.emit(GameEvent::PlaySound(SoundEffect::ChallengeComplete));
        } else {
            log::info!(
                "Challenge failed at {}/{} taps",
                self.state.current_taps,
                self.state.goal
            );
        }
        fx.emit(GameEvent::ChallengeEnded { success });
    }
}
