//! Shared simulation types
//!
//! Modes, phases, power-up identities and the events the core reports to the
//! presentation and audio layers.

use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;
use crate::error::ParseModeError;

/// Which ruleset the run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Fixed overall goal, can be won; scored by goal reached
    #[default]
    Race,
    /// No win condition, challenges enabled; scored by total taps
    Endless,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Race => "Race",
            GameMode::Endless => "Endless",
        }
    }

}

impl std::str::FromStr for GameMode {
    type Err = ParseModeError;

    /// Case-insensitive mode name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "race" => Ok(GameMode::Race),
            "endless" => Ok(GameMode::Endless),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Top-level session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Menu,
    Active,
    GameOver,
    Won,
}

/// Screen the presentation layer is asked to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Gameplay,
    GameOver,
    Win,
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Multiplier,
    FreezeTime,
    Bomb,
}

/// Handle to a spawned power-up. Never reused within a spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PowerUpId(pub u32);

/// Why a power-up left the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Tapped in time, effect applied
    Activated,
    /// Untapped past its display duration
    Expired,
    /// Pushed out by a newer spawn at the active cap
    Evicted,
    /// Bomb countdown ran out, penalty applied
    Detonated,
    /// Bomb disposal grace delay finished
    Disposed,
    /// Board cleared (challenge start, session end)
    Cleared,
}

/// Informational output of the core. The core never waits on a response.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Whole seconds shown on the timer
    TimerChanged { seconds: u32 },
    TapCountChanged { total: u32 },
    GoalChanged { goal: u32 },
    /// Race mode target shown next to the tap count
    OverallGoalShown { goal: u32 },
    ScreenChanged(Screen),
    FreezeChanged { frozen: bool },
    MultiplierChanged { factor: u32 },

    PowerUpSpawned {
        id: PowerUpId,
        kind: PowerUpKind,
        slot: usize,
    },
    PowerUpRemoved {
        id: PowerUpId,
        reason: RemovalReason,
    },
    /// Bomb tapped in time; it lingers briefly as a disposal acknowledgment
    BombDisposed { id: PowerUpId },
    /// Whole seconds left on a bomb, sent whenever the shown value changes
    BombCountdown { id: PowerUpId, seconds: u32 },

    ChallengeStarted { goal: u32, time_limit: f32 },
    ChallengeProgress { taps: u32, goal: u32 },
    ChallengeTimer { time_left: f32 },
    ChallengeEnded { success: bool },

    ScoreSaved {
        mode: GameMode,
        score: u32,
        rank: Option<usize>,
    },

    PlaySound(SoundEffect),
}

/// Seconds as shown on a countdown display
#[inline]
pub fn display_seconds(seconds: f32) -> u32 {
    seconds.max(0.0).ceil() as u32
}
