//! Mastery ladder: the word progress rule.
//!
//! A correct answer climbs the ladder by a fixed step, a wrong one slides
//! back by a smaller step. The whole part of the mastery level picks the
//! review interval.

use super::{ProgressAlgorithm, SchedulingResult, REVIEW_INTERVALS_DAYS};
use crate::types::ProgressRecord;
use chrono::{DateTime, Duration, Utc};

/// Mastery ladder with configurable parameters.
#[derive(Debug, Clone)]
pub struct MasteryLadder {
    pub correct_step: f64,
    pub incorrect_step: f64,
    pub max_level: f64,
    pub intervals_days: Vec<u32>,
}

impl Default for MasteryLadder {
    fn default() -> Self {
        Self {
            correct_step: 0.2,
            incorrect_step: 0.1,
            max_level: 5.0,
            intervals_days: REVIEW_INTERVALS_DAYS.to_vec(),
        }
    }
}

impl ProgressAlgorithm for MasteryLadder {
    fn name(&self) -> &'static str {
        "mastery_ladder"
    }

    fn apply(
        &self,
        progress: &ProgressRecord,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> SchedulingResult {
        let mut next = progress.clone();

        if is_correct {
            next.correct_count = next.correct_count.saturating_add(1);
            next.mastery_level =
                (progress.mastery_level + self.correct_step).clamp(0.0, self.max_level);
        } else {
            next.incorrect_count = next.incorrect_count.saturating_add(1);
            next.mastery_level =
                (progress.mastery_level - self.incorrect_step).clamp(0.0, self.max_level);
        }

        let interval_days = self.interval_for(whole_level(next.mastery_level));
        let next_review = now + Duration::days(i64::from(interval_days));

        next.last_reviewed = Some(now);
        next.next_review = Some(next_review);

        SchedulingResult {
            progress: next,
            interval_days,
            next_review,
        }
    }
}

impl MasteryLadder {
    /// Interval for a whole level; levels past the table reuse its last entry.
    pub fn interval_for(&self, level: u32) -> u32 {
        match self.intervals_days.last() {
            Some(&last) => self
                .intervals_days
                .get(level as usize)
                .copied()
                .unwrap_or(last),
            None => 1,
        }
    }
}

/// Whole part of a mastery level, as stored.
pub fn whole_level(mastery_level: f64) -> u32 {
    mastery_level.floor().max(0.0) as u32
}
