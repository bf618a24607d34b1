//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while validating vocabulary input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("difficulty must be between 1 and 5, got {0}")]
    InvalidDifficulty(u8),

    #[error("correct answers ({correct}) exceed total questions ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },

    #[error("total questions must be greater than zero")]
    NoQuestions,

    #[error("accuracy must be between 0 and 1, got {0}")]
    InvalidAccuracy(f64),
}
