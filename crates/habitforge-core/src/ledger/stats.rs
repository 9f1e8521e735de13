//! Read-only statistics over a ledger.

use std::fmt;

use serde::Serialize;

use crate::habit::Habit;

use super::Progress;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub habit_count: usize,
    pub longest_streak: u32,
    pub average_streak: f64,
    /// Percentage of habits completed at least once
    pub success_rate: f64,
    pub total_xp: u32,
    pub exp_needed: u32,
    pub level: u32,
    pub current_hp: u32,
    pub coins: u32,
}

impl Statistics {
    pub(crate) fn compute(habits: &[Habit], progress: Progress) -> Self {
        let habit_count = habits.len();
        let longest_streak = habits.iter().map(Habit::current_streak).max().unwrap_or(0);
        let (average_streak, success_rate) = if habit_count == 0 {
            (0.0, 0.0)
        } else {
            let total: u64 = habits.iter().map(|h| u64::from(h.current_streak())).sum();
            let completed = habits.iter().filter(|h| h.has_completion()).count();
            (
                total as f64 / habit_count as f64,
                completed as f64 / habit_count as f64 * 100.0,
            )
        };

        Self {
            habit_count,
            longest_streak,
            average_streak,
            success_rate,
            total_xp: progress.total_xp,
            exp_needed: progress.exp_needed,
            level: progress.level,
            current_hp: progress.current_hp,
            coins: progress.coins,
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Statistics ---")?;
        if self.habit_count == 0 {
            writeln!(f, "No habits to show statistics for.")?;
        }
        writeln!(
            f,
            "Total XP: {} / {} needed for next level",
            self.total_xp, self.exp_needed
        )?;
        writeln!(f, "Level: {}", self.level)?;
        writeln!(f, "Longest Streak: {}", self.longest_streak)?;
        writeln!(f, "Average Streak Length: {:.2}", self.average_streak)?;
        writeln!(f, "Success Rate: {:.2}%", self.success_rate)?;
        writeln!(f, "Current HP: {}", self.current_hp)?;
        writeln!(f, "Coins: {}", self.coins)?;
        write!(f, "------------------")
    }
}
