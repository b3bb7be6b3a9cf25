//! Error types for the edges of the crate.
//!
//! Gameplay never fails; only persistence, configuration loading and mode
//! names from outside can.

use thiserror::Error;

/// Failure reading or writing a persisted blob.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("blob store I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend exists but cannot be reached (e.g. LocalStorage disabled).
    #[error("blob store unavailable: {0}")]
    Unavailable(String),
}

/// Rejected tuning file or values.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("spawn probability '{name}' = {value} is negative")]
    NegativeProbability { name: &'static str, value: f32 },

    #[error("spawn probabilities sum to {0}, which exceeds 1.0")]
    ProbabilitySum(f32),

    #[error("'{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("'{name}' must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("multiplier_factor must be at least 1, got {0}")]
    MultiplierFactor(u32),
}

/// Mode name that is neither Race nor Endless.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game mode '{0}'")]
pub struct ParseModeError(pub String);
