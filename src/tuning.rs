//! Data-driven game balance
//!
//! Every constant the session core reads lives here. Defaults are the
//! reference values; a JSON file can override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Spawn chances per power-up kind. Whatever is left over up to 1.0 means
/// "no spawn".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnChances {
    pub multiplier: f32,
    pub freeze: f32,
    pub bomb: f32,
}

impl Default for SpawnChances {
    fn default() -> Self {
        Self {
            multiplier: 0.3,
            freeze: 0.2,
            bomb: 0.1,
        }
    }
}

impl SpawnChances {
    pub fn total(&self) -> f32 {
        self.multiplier + self.freeze + self.bomb
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// Seconds on the clock when a run starts
    pub session_start_time: f32,
    /// Goal increase per level-up
    pub level_goal_step: u32,
    /// Goal of the first level
    pub first_goal: u32,
    /// Race mode win target
    pub overall_goal: u32,
    /// Seconds granted per level-up in Endless mode
    pub endless_level_bonus: f32,

    // === Challenges ===
    /// Seconds between challenges
    pub challenge_interval: f32,
    /// Taps between challenges
    pub tap_interval: u32,
    pub default_challenge_goal: u32,
    pub default_challenge_time: f32,
    /// Seconds granted for beating a challenge
    pub challenge_reward: f32,

    // === Power-ups ===
    pub max_active_power_ups: usize,
    /// Seconds a multiplier/freeze stays up before vanishing
    pub display_duration: f32,
    pub spawn_chances: SpawnChances,
    pub bomb_countdown: f32,
    pub bomb_penalty: f32,
    pub bomb_dispose_grace: f32,
    pub multiplier_factor: u32,
    pub multiplier_duration: f32,
    /// Extra seconds a multiplier grants in Endless mode
    pub multiplier_endless_bonus: f32,
    pub freeze_duration: f32,

    // === Leaderboard ===
    pub max_leaderboard_entries: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            session_start_time: 30.0,
            level_goal_step: 10,
            first_goal: 10,
            overall_goal: 100,
            endless_level_bonus: 10.0,

            challenge_interval: 30.0,
            tap_interval: 100,
            default_challenge_goal: 50,
            default_challenge_time: 10.0,
            challenge_reward: 15.0,

            max_active_power_ups: 3,
            display_duration: 3.0,
            spawn_chances: SpawnChances::default(),
            bomb_countdown: 5.0,
            bomb_penalty: 10.0,
            bomb_dispose_grace: 0.5,
            multiplier_factor: 2,
            multiplier_duration: 1.5,
            multiplier_endless_bonus: 1.0,
            freeze_duration: 2.0,

            max_leaderboard_entries: 10,
        }
    }
}

impl Tuning {
    /// Parse from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the session core cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let chances = &self.spawn_chances;
        for (name, value) in [
            ("multiplier", chances.multiplier),
            ("freeze", chances.freeze),
            ("bomb", chances.bomb),
        ] {
            if value < 0.0 {
                return Err(TuningError::NegativeProbability { name, value });
            }
        }
        if chances.total() > 1.0 + 1e-5 {
            return Err(TuningError::ProbabilitySum(chances.total()));
        }

        for (name, value) in [
            ("session_start_time", self.session_start_time),
            ("challenge_interval", self.challenge_interval),
            ("default_challenge_time", self.default_challenge_time),
            ("display_duration", self.display_duration),
            ("bomb_countdown", self.bomb_countdown),
            ("multiplier_duration", self.multiplier_duration),
            ("freeze_duration", self.freeze_duration),
        ] {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("endless_level_bonus", self.endless_level_bonus),
            ("challenge_reward", self.challenge_reward),
            ("bomb_penalty", self.bomb_penalty),
            ("bomb_dispose_grace", self.bomb_dispose_grace),
            ("multiplier_endless_bonus", self.multiplier_endless_bonus),
        ] {
            if value < 0.0 {
                return Err(TuningError::Negative { name, value });
            }
        }
        if self.multiplier_factor < 1 {
            return Err(TuningError::MultiplierFactor(self.multiplier_factor));
        }
        if self.max_active_power_ups == 0 {
            return Err(TuningError::NonPositive {
                name: "max_active_power_ups",
                value: 0.0,
            });
        }
        Ok(())
    }
}
