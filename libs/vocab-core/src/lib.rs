//! Core vocabulary library shared by the backend and its tests.
//!
//! Provides:
//! - Word, progress and game-session types
//! - The mastery ladder progress rule and review interval table
//! - Best-effort extraction of words from generator output
//! - Prompt text for vocabulary generation

pub mod algorithm;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod types;

pub use algorithm::{schedule_interval, MasteryLadder, ProgressAlgorithm, SchedulingResult};
pub use error::{CoreError, Result};
pub use extract::{extract_words, GeneratedWord};
pub use types::{
    Example, GameType, ProgressRecord, ReviewedWord, SessionResults, Word, WordInput,
};
