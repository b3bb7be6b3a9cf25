//! Game session orchestration
//!
//! [`GameSession`] owns the session record, the power-up spawner, the
//! challenge engine and the leaderboard, and drives the menu → active →
//! game over / win → menu lifecycle. Everything it reports goes out as
//! [`GameEvent`]s drained by the host.

use super::challenge::{ChallengeEngine, ChallengeOutcome};
use super::effects::SessionEffects;
use super::powerups::PowerUpSpawner;
use super::session::Session;
use super::state::{
    GameEvent, GameMode, PowerUpId, PowerUpKind, RemovalReason, Screen, SessionPhase,
};
use crate::audio::SoundEffect;
use crate::leaderboard::LeaderboardStore;
use crate::tuning::Tuning;

/// One player's game: all session-scoped state plus the score store
#[derive(Debug)]
pub struct GameSession {
    tuning: Tuning,
    session: Session,
    spawner: PowerUpSpawner,
    challenge: ChallengeEngine,
    leaderboard: LeaderboardStore,
}

impl GameSession {
    /// `seed` drives every random draw (spawn kind and slot)
    pub fn new(tuning: Tuning, leaderboard: LeaderboardStore, seed: u64) -> Self {
        let mut session = Session::new(&tuning);
        session.emit(GameEvent::ScreenChanged(Screen::MainMenu));
        Self {
            spawner: PowerUpSpawner::new(&tuning, seed),
            challenge: ChallengeEngine::new(&tuning),
            session,
            leaderboard,
            tuning,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn spawner(&self) -> &PowerUpSpawner {
        &self.spawner
    }

    pub fn challenge(&self) -> &ChallengeEngine {
        &self.challenge
    }

    pub fn leaderboard(&self) -> &LeaderboardStore {
        &self.leaderboard
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn mode(&self) -> GameMode {
        self.session.mode()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn now(&self) -> f32 {
        self.session.now()
    }

    pub fn time_remaining(&self) -> f32 {
        self.session.time_remaining()
    }

    pub fn goal(&self) -> u32 {
        self.session.goal()
    }

    pub fn total_taps(&self) -> u32 {
        self.session.total_taps()
    }

    pub fn tap_multiplier(&self) -> u32 {
        self.session.tap_multiplier()
    }

    pub fn is_frozen(&self) -> bool {
        self.session.is_frozen()
    }

    /// Take everything reported since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    // === Lifecycle ===

    /// Fresh run in `mode`, whatever state we were in
    pub fn start_game(&mut self, mode: GameMode) {
        self.begin(mode);
    }

    /// Fresh run in the current mode
    pub fn restart_game(&mut self) {
        self.begin(self.session.mode());
    }

    fn begin(&mut self, mode: GameMode) {
        // Clock rebase first; the challenge baseline and spawner reset use it
        self.session.reset(mode, &self.tuning);
        self.challenge.reset(&mut self.session, &mut self.spawner);
        self.session.set_phase(SessionPhase::Active);

        if mode == GameMode::Race {
            let goal = self.session.overall_goal();
            self.session.emit(GameEvent::OverallGoalShown { goal });
        }
        self.session.emit(GameEvent::ScreenChanged(Screen::Gameplay));
        log::info!("{:?} run started", mode);
    }

    /// Run lost (clock out or challenge failed). No-op unless active.
    pub fn game_over(&mut self) {
        if !self.is_active() {
            return;
        }
        self.session.set_phase(SessionPhase::GameOver);
        self.session.emit(GameEvent::ScreenChanged(Screen::GameOver));
        self.session.emit(GameEvent::PlaySound(SoundEffect::GameOver));
        self.spawner.hide_all(&mut self.session);

        log::info!(
            "Game over: {} taps, goal {}",
            self.session.total_taps(),
            self.session.goal()
        );
        self.report_score();
    }

    /// Race goal reached. No-op in Endless mode or unless active.
    pub fn win_game(&mut self) {
        if !self.is_active() || self.session.mode() == GameMode::Endless {
            return;
        }
        self.session.set_phase(SessionPhase::Won);
        self.session.emit(GameEvent::ScreenChanged(Screen::Win));
        self.session.emit(GameEvent::PlaySound(SoundEffect::Win));
        self.spawner.hide_all(&mut self.session);

        log::info!("Race won at goal {}", self.session.goal());
        self.report_score();
    }

    /// Full reset and back to the menu, from any state
    pub fn back_to_main_menu(&mut self) {
        self.session.set_phase(SessionPhase::Menu);
        self.session.reset(self.session.mode(), &self.tuning);
        self.challenge.reset(&mut self.session, &mut self.spawner);
        self.session.emit(GameEvent::ScreenChanged(Screen::MainMenu));
        log::info!("Back to main menu");
    }

    fn report_score(&mut self) {
        let mode = self.session.mode();
        let score = match mode {
            GameMode::Endless => self.session.total_taps(),
            GameMode::Race => self.session.goal(),
        };
        let rank = self.leaderboard.save_score(mode, score);
        self.session
            .emit(GameEvent::ScoreSaved { mode, score, rank });
    }

    // === Input ===

    /// One tap on the main button. Ignored unless active.
    pub fn on_tap(&mut self) {
        if !self.is_active() {
            return;
        }
        self.session.emit(GameEvent::PlaySound(SoundEffect::Tap));
        let total = self.session.register_tap();

        if total >= self.session.goal() {
            self.level_up();
        }
        if self.session.mode() == GameMode::Race && total >= self.session.overall_goal() {
            self.win_game();
        }

        if self.session.mode() == GameMode::Endless && self.is_active() {
            if self.challenge.is_active() {
                self.challenge.on_tap(&mut self.session, &mut self.spawner);
            } else {
                // Tap-count trigger fires on the tap that crosses the interval
                self.challenge
                    .check_trigger(&mut self.session, &mut self.spawner);
            }
        }
    }

    /// Raise the goal, roll for a power-up, and add time in Endless mode
    pub fn level_up(&mut self) {
        if !self.is_active() {
            return;
        }
        self.session.raise_goal(self.tuning.level_goal_step);
        self.session
            .emit(GameEvent::PlaySound(SoundEffect::LevelUp));

        if !self.challenge.is_active() {
            self.spawner.try_spawn(&mut self.session);
        }
        if self.session.mode() == GameMode::Endless {
            self.session.add_time(self.tuning.endless_level_bonus);
        }
    }

    /// Player tapped a power-up
    pub fn press_power_up(&mut self, id: PowerUpId) -> bool {
        if !self.is_active() {
            return false;
        }
        self.spawner.interact(id, &mut self.session)
    }

    // === Power-up control ===

    /// Random spawn attempt, as after a level-up. Ignored unless active.
    pub fn try_spawn_power_up(&mut self) -> Option<PowerUpId> {
        if !self.is_active() {
            return None;
        }
        self.spawner.try_spawn(&mut self.session)
    }

    /// Place a specific kind, skipping the random draw (debug/testing)
    pub fn spawn_power_up(&mut self, kind: PowerUpKind) -> Option<PowerUpId> {
        if !self.is_active() {
            return None;
        }
        self.spawner.spawn(kind, &mut self.session)
    }

    pub fn remove_power_up(&mut self, id: PowerUpId) -> bool {
        self.spawner
            .remove_power_up(id, RemovalReason::Cleared, &mut self.session)
    }

    pub fn hide_all_power_ups(&mut self) {
        self.spawner.hide_all(&mut self.session);
    }

    // === Timer control ===

    /// Freeze for `duration` seconds, replacing any pending unfreeze
    pub fn freeze_timer(&mut self, duration: f32) {
        self.session.freeze_timer(Some(duration));
    }

    pub fn unfreeze_timer(&mut self) {
        self.session.unfreeze_timer();
    }

    pub fn reduce_timer(&mut self, amount: f32) {
        self.session.reduce_timer(amount);
    }

    pub fn add_time(&mut self, amount: f32) {
        self.session.add_time(amount);
    }

    // === Frame step ===

    /// Advance by `dt` seconds: scheduled effects, then timer decay, then the
    /// challenge trigger/countdown
    pub fn update(&mut self, dt: f32) {
        self.session.advance_clock(dt);
        self.spawner.update(&mut self.session);

        if self.session.decay(dt) {
            self.game_over();
        }

        if self.is_active() {
            let outcome = self
                .challenge
                .update(dt, &mut self.session, &mut self.spawner);
            if outcome == Some(ChallengeOutcome::Failed) {
                self.game_over();
            }
        }
    }
}
