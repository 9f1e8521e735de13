//! Write-through facade over a [`ProgressionLedger`].
//!
//! Front ends (CLI, GUI) talk to a [`Tracker`]. Each mutating operation runs
//! against the in-memory ledger and then saves the full ledger through the
//! injected [`LedgerStore`]. Rejected adds and creates leave the store
//! untouched; deletes, marks and exchanges save whatever the outcome.

use chrono::{Local, NaiveDateTime};

use crate::error::{CoreError, LedgerError, Result};
use crate::habit::{Habit, Periodicity};
use crate::ledger::{MarkOutcome, ProgressionLedger, ProgressionRules, Statistics};
use crate::reward::{Difficulty, Redemption, Reward};
use crate::storage::LedgerStore;

/// Local wall-clock time, the timestamp used by the non-`_at` operations.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub struct Tracker<S: LedgerStore> {
    ledger: ProgressionLedger,
    store: S,
}

impl<S: LedgerStore> Tracker<S> {
    /// Load the ledger from `store`. A missing or unreadable store is not
    /// fatal: the tracker starts from the default state.
    pub fn open(store: S, rules: ProgressionRules) -> Self {
        let ledger = match store.load() {
            Ok(Some(ledger)) => ledger,
            Ok(None) => {
                tracing::debug!("no stored ledger, starting fresh");
                ProgressionLedger::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load ledger, starting with default settings");
                ProgressionLedger::new()
            }
        };
        Self {
            ledger: ledger.with_rules(rules),
            store,
        }
    }

    /// Wrap an existing ledger without loading.
    pub fn with_ledger(ledger: ProgressionLedger, store: S) -> Self {
        Self { ledger, store }
    }

    pub fn ledger(&self) -> &ProgressionLedger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (ProgressionLedger, S) {
        (self.ledger, self.store)
    }

    pub fn habits(&self) -> &[Habit] {
        self.ledger.habits()
    }

    pub fn rewards(&self) -> &[Reward] {
        self.ledger.rewards()
    }

    pub fn view_statistics(&self) -> Statistics {
        self.ledger.statistics()
    }

    /// `(level, total_xp, exp_needed)`
    pub fn level_and_exp(&self) -> (u32, u32, u32) {
        self.ledger.level_and_exp()
    }

    /// Save the ledger, then hand back the operation's own result. A failed
    /// save wins over the operation result.
    fn persist<T>(&mut self, result: std::result::Result<T, LedgerError>) -> Result<T> {
        self.store.save(&self.ledger)?;
        result.map_err(CoreError::from)
    }

    pub fn add_habit(&mut self, name: &str, periodicity: Periodicity) -> Result<()> {
        self.ledger.add_habit(name, periodicity)?;
        tracing::debug!(habit = name, %periodicity, "habit added");
        self.persist(Ok(()))
    }

    /// Delete a habit. Confirmation is the caller's job. Returns whether a
    /// habit was removed.
    pub fn delete_habit(&mut self, name: &str) -> Result<bool> {
        let removed = self.ledger.delete_habit(name).is_some();
        self.persist(Ok(removed))
    }

    pub fn mark_habit(&mut self, name: &str) -> Result<MarkOutcome> {
        self.mark_habit_at(name, now())
    }

    pub fn mark_habit_at(&mut self, name: &str, at: NaiveDateTime) -> Result<MarkOutcome> {
        let result = self.ledger.mark_habit(name, at);
        self.persist(result)
    }

    pub fn create_reward(&mut self, name: &str, difficulty: Difficulty) -> Result<()> {
        self.ledger.create_reward(name, difficulty)?;
        tracing::debug!(reward = name, %difficulty, "reward created");
        self.persist(Ok(()))
    }

    /// Delete a reward. Returns whether a reward was removed.
    pub fn delete_reward(&mut self, name: &str) -> Result<bool> {
        let removed = self.ledger.delete_reward(name).is_some();
        self.persist(Ok(removed))
    }

    pub fn exchange_reward(&mut self, name: &str) -> Result<Redemption> {
        self.exchange_reward_at(name, now())
    }

    pub fn exchange_reward_at(&mut self, name: &str, at: NaiveDateTime) -> Result<Redemption> {
        let result = self.ledger.exchange_reward(name, at);
        self.persist(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap()
    }

    fn tracker() -> Tracker<MemoryStore> {
        Tracker::open(MemoryStore::new(), ProgressionRules::default())
    }

    #[test]
    fn rejected_add_does_not_save() {
        let mut tracker = tracker();
        tracker.add_habit("Pushups", Periodicity::Daily).unwrap();
        assert_eq!(tracker.store().saves(), 1);

        let err = tracker.add_habit("Pushups", Periodicity::Daily).unwrap_err();
        assert!(matches!(err, CoreError::Ledger(LedgerError::DuplicateHabit(_))));
        assert_eq!(tracker.store().saves(), 1);
    }

    #[test]
    fn failed_mark_and_exchange_still_save() {
        let mut tracker = tracker();
        assert!(tracker.mark_habit_at("Ghost", day(1)).is_err());
        assert_eq!(tracker.store().saves(), 1);

        tracker.create_reward("Movie Night", Difficulty::Medium).unwrap();
        let err = tracker.exchange_reward_at("Movie Night", day(1)).unwrap_err();
        assert!(matches!(err, CoreError::Ledger(LedgerError::InsufficientXp { .. })));
        assert_eq!(tracker.store().saves(), 3);

        assert!(!tracker.delete_habit("Ghost").unwrap());
        assert!(tracker.delete_reward("Movie Night").unwrap());
        assert_eq!(tracker.store().saves(), 5);
    }

    #[test]
    fn save_failure_takes_precedence() {
        let mut tracker = Tracker::open(MemoryStore::failing(), ProgressionRules::default());
        let err = tracker.mark_habit_at("Ghost", day(1)).unwrap_err();
        assert!(matches!(err, CoreError::Store(_)));
    }

    #[test]
    fn malformed_store_falls_back_to_defaults() {
        let tracker = Tracker::open(MemoryStore::with_json("[1, 2"), ProgressionRules::default());
        assert_eq!(tracker.level_and_exp(), (1, 0, 100));
        assert!(tracker.habits().is_empty());
    }

    #[test]
    fn mistyped_timestamp_keeps_progress() {
        let json = r#"{
            "habits": [{"name": "Pushups", "periodicity": "daily", "streak": 5, "last_completed": 20250109}],
            "total_xp": 20, "level": 4, "exp_needed": 250, "coins": 300
        }"#;
        let tracker = Tracker::open(MemoryStore::with_json(json), ProgressionRules::default());
        assert_eq!(tracker.level_and_exp(), (4, 20, 250));
        assert_eq!(tracker.ledger().progress().coins, 300);
        assert_eq!(tracker.habits().len(), 1);
        assert_eq!(tracker.habits()[0].current_streak(), 0);
    }

    #[test]
    fn reopen_sees_saved_state() {
        let mut tracker = tracker();
        tracker.add_habit("Pushups", Periodicity::Daily).unwrap();
        tracker.mark_habit_at("Pushups", day(1)).unwrap();
        let (_, store) = tracker.into_parts();

        let reopened = Tracker::open(store, ProgressionRules::default());
        assert_eq!(reopened.level_and_exp(), (1, 10, 100));
        assert_eq!(reopened.habits()[0].current_streak(), 1);
        assert_eq!(reopened.habits()[0].last_completed(), Some(day(1)));
    }
}
