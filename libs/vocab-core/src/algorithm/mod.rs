//! Review scheduling for word progress.

pub mod mastery;

pub use mastery::MasteryLadder;

use crate::types::ProgressRecord;
use chrono::{DateTime, Utc};

/// Days until the next review, indexed by whole mastery level.
pub const REVIEW_INTERVALS_DAYS: [u32; 5] = [1, 3, 7, 14, 30];

/// Result of applying one review outcome.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    pub progress: ProgressRecord,
    pub interval_days: u32,
    pub next_review: DateTime<Utc>,
}

/// Trait for progress update rules.
pub trait ProgressAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Apply a single correct/incorrect answer to the progress record.
    fn apply(&self, progress: &ProgressRecord, is_correct: bool, now: DateTime<Utc>)
        -> SchedulingResult;
}

/// Review interval in days for a whole mastery level.
///
/// Levels above the table reuse the last entry, so level 5 waits 30 days
/// just like level 4.
pub fn schedule_interval(level: u32) -> u32 {
    let index = (level as usize).min(REVIEW_INTERVALS_DAYS.len() - 1);
    REVIEW_INTERVALS_DAYS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_table() {
        assert_eq!(schedule_interval(0), 1);
        assert_eq!(schedule_interval(1), 3);
        assert_eq!(schedule_interval(2), 7);
        assert_eq!(schedule_interval(3), 14);
        assert_eq!(schedule_interval(4), 30);
    }

    #[test]
    fn levels_past_the_table_clamp() {
        assert_eq!(schedule_interval(5), 30);
        assert_eq!(schedule_interval(u32::MAX), 30);
    }

    #[test]
    fn intervals_never_shrink_with_level() {
        for level in 0..6 {
            assert!(schedule_interval(level) <= schedule_interval(level + 1));
        }
    }
}
