//! Deterministic session simulation
//!
//! All gameplay logic lives here. Pure and deterministic:
//! - Time only advances through `update(dt)`
//! - Seeded RNG only
//! - Stable iteration order (spawn order, scheduling order)
//! - No rendering, audio playback or storage; those are reached via events

pub mod challenge;
pub mod effects;
pub mod game;
pub mod powerups;
pub mod session;
pub mod state;
pub mod tick;
pub mod timers;

pub use challenge::{ChallengeEngine, ChallengeOutcome, ChallengeState};
pub use effects::SessionEffects;
pub use game::GameSession;
pub use powerups::{DEFAULT_SLOT_ANCHORS, Lifecycle, PowerUp, PowerUpSpawner, Slot, draw_kind};
pub use session::Session;
pub use state::{
    GameEvent, GameMode, PowerUpId, PowerUpKind, RemovalReason, Screen, SessionPhase,
    display_seconds,
};
pub use tick::{Autopilot, TickInput, tick};
pub use timers::{TimerId, Timers};
