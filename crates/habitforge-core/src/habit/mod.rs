//! A single recurring habit and its completion algorithm.
//!
//! Completing a habit is idempotent within a period: a second completion in
//! the same day (daily) or Monday-starting week (weekly) awards nothing.
//! Completing in the next period continues the streak, anything later
//! starts a new one.

mod period;

pub use period::Periodicity;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::storage::timestamp;

/// Streak length granting one extra XP per completion.
pub const STREAK_BONUS_DIVISOR: u32 = 5;

/// How a call to [`Habit::mark_complete`] affected the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionKind {
    /// First ever completion
    First,
    /// Completed in the period right after the last completion
    Continued,
    /// At least one period was skipped
    Broken,
    /// Already completed in the current period; nothing changed
    AlreadyDone,
}

/// Result of marking a habit complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub was_completed: bool,
    pub message: String,
    pub xp_gained: u32,
    /// Streak after the call
    pub streak: u32,
    pub kind: CompletionKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Habit {
    name: String,
    periodicity: Periodicity,
    #[serde(rename = "streak")]
    current_streak: u32,
    #[serde(rename = "last_completed", serialize_with = "timestamp::serialize_opt")]
    last_completed: Option<NaiveDateTime>,
}

impl Habit {
    /// A habit that has never been completed.
    pub fn new(name: impl Into<String>, periodicity: Periodicity) -> Self {
        Self {
            name: name.into(),
            periodicity,
            current_streak: 0,
            last_completed: None,
        }
    }

    /// Rebuild a habit from persisted fields.
    ///
    /// Repairs records that break the "streak is zero exactly when there is
    /// no completion date" rule: a streak without a date drops to 0, a date
    /// with a zero streak counts as a streak of 1.
    pub fn restore(
        name: impl Into<String>,
        periodicity: Periodicity,
        streak: u32,
        last_completed: Option<NaiveDateTime>,
    ) -> Self {
        let name = name.into();
        let current_streak = match (streak, last_completed) {
            (0, Some(_)) => {
                tracing::warn!(habit = %name, "completion date without streak, setting streak to 1");
                1
            }
            (s, None) if s > 0 => {
                tracing::warn!(habit = %name, streak = s, "streak without completion date, resetting to 0");
                0
            }
            (s, _) => s,
        };
        Self {
            name,
            periodicity,
            current_streak,
            last_completed,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn last_completed(&self) -> Option<NaiveDateTime> {
        self.last_completed
    }

    /// Whether the habit has ever been completed.
    pub fn has_completion(&self) -> bool {
        self.last_completed.is_some()
    }

    /// Mark the habit complete at `completed_at`.
    pub fn mark_complete(&mut self, completed_at: NaiveDateTime) -> Completion {
        let date = completed_at.date();
        let kind = match self.last_completed {
            None => CompletionKind::First,
            Some(last) if self.periodicity.same_period(last.date(), date) => {
                return self.already_done();
            }
            Some(last) if self.periodicity.is_next_period(last.date(), date) => {
                CompletionKind::Continued
            }
            // Skipped periods, or a completion dated before the last one
            Some(_) => CompletionKind::Broken,
        };

        let message = match kind {
            CompletionKind::Continued => {
                self.current_streak = self.current_streak.saturating_add(1);
                format!("Streak continued! Current streak: {}.", self.current_streak)
            }
            CompletionKind::Broken => {
                self.current_streak = 1;
                "Streak broken. New streak started!".to_string()
            }
            _ => {
                self.current_streak = 1;
                "First completion! Streak started.".to_string()
            }
        };
        self.last_completed = Some(completed_at);

        Completion {
            was_completed: true,
            message,
            xp_gained: self.calculate_xp(),
            streak: self.current_streak,
            kind,
        }
    }

    fn already_done(&self) -> Completion {
        let message = match self.periodicity {
            Periodicity::Daily => "Already completed today.",
            Periodicity::Weekly => "Already completed this week.",
        };
        Completion {
            was_completed: false,
            message: message.to_string(),
            xp_gained: 0,
            streak: self.current_streak,
            kind: CompletionKind::AlreadyDone,
        }
    }

    /// XP for a completion at the current streak: base XP plus one per
    /// [`STREAK_BONUS_DIVISOR`] streak periods.
    pub fn calculate_xp(&self) -> u32 {
        self.periodicity.base_xp() + self.current_streak / STREAK_BONUS_DIVISOR
    }

    /// Whether the streak can still be continued at `now`, i.e. the last
    /// completion is in the current period or the one before it.
    pub fn is_streak_active(&self, now: NaiveDateTime) -> bool {
        match self.last_completed {
            Some(last) => {
                self.periodicity.same_period(last.date(), now.date())
                    || self.periodicity.is_next_period(last.date(), now.date())
            }
            None => false,
        }
    }
}
