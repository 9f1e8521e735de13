//! Progression ledger: habits, rewards and the XP/level/coin counters.
//!
//! The ledger is a plain value with no I/O. Every operation that depends on
//! the clock takes an explicit timestamp; persistence is layered on top by
//! [`Tracker`](crate::tracker::Tracker).

mod rules;
mod stats;

pub use rules::{
    Progress, ProgressionRules, XpOverflow, STARTING_EXP_NEEDED, STARTING_HP, STARTING_LEVEL,
};
pub use stats::Statistics;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{LedgerError, ValidationError};
use crate::events::Event;
use crate::habit::{Completion, Habit, Periodicity};
use crate::reward::{Difficulty, Redemption, Reward};

/// Result of [`ProgressionLedger::mark_habit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkOutcome {
    pub habit: String,
    pub completion: Completion,
    pub coins_gained: u32,
    /// Completion and level-up events, empty for a no-op
    pub events: Vec<Event>,
}

impl MarkOutcome {
    pub fn levels_gained(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::LeveledUp { .. }))
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressionLedger {
    habits: Vec<Habit>,
    rewards: Vec<Reward>,
    progress: Progress,
    rules: ProgressionRules,
}

impl ProgressionLedger {
    /// An empty ledger at level 1 with default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty ledger with the given progress counters.
    pub fn with_progress(progress: Progress) -> Self {
        Self {
            progress: progress.normalized(),
            ..Self::default()
        }
    }

    /// Rebuild a ledger from persisted parts. Duplicate names keep the
    /// first occurrence.
    pub fn from_parts(habits: Vec<Habit>, rewards: Vec<Reward>, progress: Progress) -> Self {
        let mut ledger = Self::with_progress(progress);
        for habit in habits {
            if ledger.habit(habit.name()).is_some() {
                tracing::warn!(habit = habit.name(), "dropping duplicate habit");
                continue;
            }
            ledger.habits.push(habit);
        }
        for reward in rewards {
            if ledger.reward(&reward.name).is_some() {
                tracing::warn!(reward = %reward.name, "dropping duplicate reward");
                continue;
            }
            ledger.rewards.push(reward);
        }
        ledger
    }

    pub fn with_rules(mut self, rules: ProgressionRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &ProgressionRules {
        &self.rules
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn habit(&self, name: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.name() == name)
    }

    pub fn reward(&self, name: &str) -> Option<&Reward> {
        self.rewards.iter().find(|r| r.name == name)
    }

    /// `(level, total_xp, exp_needed)`
    pub fn level_and_exp(&self) -> (u32, u32, u32) {
        (
            self.progress.level,
            self.progress.total_xp,
            self.progress.exp_needed,
        )
    }

    pub fn add_habit(&mut self, name: &str, periodicity: Periodicity) -> Result<(), LedgerError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName("Habit").into());
        }
        if self.habit(name).is_some() {
            return Err(LedgerError::DuplicateHabit(name.to_string()));
        }
        self.habits.push(Habit::new(name, periodicity));
        Ok(())
    }

    /// Remove a habit by name, returning it if it existed.
    pub fn delete_habit(&mut self, name: &str) -> Option<Habit> {
        let idx = self.habits.iter().position(|h| h.name() == name)?;
        Some(self.habits.remove(idx))
    }

    /// Complete a habit at `now` and fold the XP and coins into the ledger.
    pub fn mark_habit(&mut self, name: &str, now: NaiveDateTime) -> Result<MarkOutcome, LedgerError> {
        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.name() == name)
            .ok_or_else(|| LedgerError::HabitNotFound(name.to_string()))?;
        let completion = habit.mark_complete(now);

        let mut outcome = MarkOutcome {
            habit: name.to_string(),
            completion,
            coins_gained: 0,
            events: Vec::new(),
        };
        if !outcome.completion.was_completed {
            return Ok(outcome);
        }

        let coins = self.rules.coins_per_completion;
        self.progress.total_xp = self
            .progress
            .total_xp
            .saturating_add(outcome.completion.xp_gained);
        self.progress.coins = self.progress.coins.saturating_add(coins);
        outcome.coins_gained = coins;
        outcome.events.push(Event::HabitCompleted {
            habit: name.to_string(),
            kind: outcome.completion.kind,
            streak: outcome.completion.streak,
            xp_gained: outcome.completion.xp_gained,
            coins_gained: coins,
            at: now,
        });
        outcome.events.extend(self.resolve_level_ups());
        Ok(outcome)
    }

    /// Level up until `total_xp < exp_needed`, returning one event per level.
    pub fn resolve_level_ups(&mut self) -> Vec<Event> {
        let rules = self.rules;
        let progress = &mut self.progress;
        let mut events = Vec::new();
        while progress.total_xp >= progress.exp_needed {
            progress.level = progress.level.saturating_add(1);
            progress.total_xp = match rules.xp_overflow {
                XpOverflow::Discard => 0,
                XpOverflow::Carry => progress.total_xp - progress.exp_needed,
            };
            progress.current_hp = progress.current_hp.saturating_add(rules.hp_per_level);
            progress.exp_needed = progress.exp_needed.saturating_add(rules.exp_step);
            tracing::info!(level = progress.level, hp = progress.current_hp, "level up");
            events.push(Event::LeveledUp {
                level: progress.level,
                current_hp: progress.current_hp,
                exp_needed: progress.exp_needed,
            });
        }
        events
    }

    pub fn create_reward(&mut self, name: &str, difficulty: Difficulty) -> Result<(), LedgerError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName("Reward").into());
        }
        if self.reward(name).is_some() {
            return Err(LedgerError::DuplicateReward(name.to_string()));
        }
        self.rewards.push(Reward::new(name, difficulty));
        Ok(())
    }

    /// Remove a reward by name, returning it if it existed.
    pub fn delete_reward(&mut self, name: &str) -> Option<Reward> {
        let idx = self.rewards.iter().position(|r| r.name == name)?;
        Some(self.rewards.remove(idx))
    }

    /// Spend XP on a reward. Nothing changes unless the exchange succeeds.
    pub fn exchange_reward(&mut self, name: &str, now: NaiveDateTime) -> Result<Redemption, LedgerError> {
        let reward = self
            .rewards
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| LedgerError::RewardNotFound(name.to_string()))?;
        let cost = reward.cost();
        if self.progress.total_xp < cost {
            return Err(LedgerError::InsufficientXp {
                reward: name.to_string(),
                cost,
                available: self.progress.total_xp,
            });
        }

        self.progress.total_xp -= cost;
        reward.last_exchanged = Some(now);
        Ok(Redemption {
            reward: name.to_string(),
            cost,
            remaining_xp: self.progress.total_xp,
            exchanged_at: now,
        })
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.habits, self.progress)
    }
}
