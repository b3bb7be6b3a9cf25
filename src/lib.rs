//! Tap Rush - a timed tap-counting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic session core (timer, goals, power-ups, challenges)
//! - `leaderboard`: Per-mode top scores
//! - `persistence`: Key/value blob stores behind the leaderboard
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound cue routing
//! - `ui`: Presentation model fed by session events

pub mod audio;
pub mod error;
pub mod leaderboard;
pub mod persistence;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::{ParseModeError, StoreError, TuningError};
pub use leaderboard::LeaderboardStore;
pub use sim::{GameEvent, GameMode, GameSession, SessionPhase};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep for headless runs
    pub const SIM_DT: f32 = 1.0 / 60.0;
}
