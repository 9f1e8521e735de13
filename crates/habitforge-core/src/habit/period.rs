//! Habit periodicity and calendar period arithmetic.
//!
//! Periods are computed from the date component only. A daily period is a
//! calendar date; a weekly period is a Monday-starting calendar week.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Recurrence unit of a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    Daily,
    Weekly,
}

impl Periodicity {
    /// XP awarded for a completion before the streak bonus.
    pub fn base_xp(self) -> u32 {
        match self {
            Periodicity::Daily => 10,
            Periodicity::Weekly => 30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Periodicity::Daily => "daily",
            Periodicity::Weekly => "weekly",
        }
    }

    fn period_days(self) -> u64 {
        match self {
            Periodicity::Daily => 1,
            Periodicity::Weekly => 7,
        }
    }

    /// First date of the period containing `date`.
    pub fn period_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Periodicity::Daily => date,
            Periodicity::Weekly => {
                let offset = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(offset)).unwrap_or(date)
            }
        }
    }

    /// First date of the period immediately after the one starting at `start`.
    pub fn next_period_start(self, start: NaiveDate) -> Option<NaiveDate> {
        start.checked_add_days(Days::new(self.period_days()))
    }

    /// Whether `a` and `b` fall in the same period.
    pub fn same_period(self, a: NaiveDate, b: NaiveDate) -> bool {
        self.period_start(a) == self.period_start(b)
    }

    /// Whether `later` falls in the period right after the one containing `earlier`.
    pub fn is_next_period(self, earlier: NaiveDate, later: NaiveDate) -> bool {
        self.next_period_start(self.period_start(earlier)) == Some(self.period_start(later))
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Periodicity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Periodicity::Daily),
            "weekly" => Ok(Periodicity::Weekly),
            _ => Err(ValidationError::UnknownPeriodicity(s.to_string())),
        }
    }
}
