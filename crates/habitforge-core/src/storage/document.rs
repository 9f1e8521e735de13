//! On-disk JSON document.
//!
//! Field names and value formats match the `habits.json` files written by
//! earlier versions of the tracker, so loading is lenient: missing numbers
//! take their defaults, the legacy `habit_type` key is read as the
//! periodicity, and unknown enum values are substituted with a warning.
//! A wrongly typed per-record value degrades to its default instead of
//! failing the whole document.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::habit::{Habit, Periodicity};
use crate::ledger::{Progress, ProgressionLedger, STARTING_EXP_NEEDED, STARTING_HP, STARTING_LEVEL};
use crate::reward::{Difficulty, Reward};

use super::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub habits: Vec<HabitRecord>,
    #[serde(default)]
    pub total_xp: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_hp")]
    pub current_hp: u32,
    #[serde(default)]
    pub coins: u32,
    #[serde(default = "default_exp_needed")]
    pub exp_needed: u32,
    #[serde(default)]
    pub rewards: Vec<RewardRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitRecord {
    #[serde(default = "default_habit_name")]
    pub name: String,
    #[serde(default, alias = "habit_type", deserialize_with = "lenient_text")]
    pub periodicity: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub streak: u32,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_completed: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardRecord {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_exchanged: Option<String>,
}

fn default_level() -> u32 {
    STARTING_LEVEL
}
fn default_hp() -> u32 {
    STARTING_HP
}
fn default_exp_needed() -> u32 {
    STARTING_EXP_NEEDED
}
fn default_habit_name() -> String {
    "Unnamed Habit".into()
}

/// Any JSON value as text. Non-strings keep their JSON rendering so the
/// enum and timestamp parsers reject them with a warning.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// A non-negative count; anything else is 0.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let count = match &value {
        Value::Null => Some(0),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    };
    Ok(count.unwrap_or_else(|| {
        tracing::warn!(value = %value, "unsupported count, using 0");
        0
    }))
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self::from_ledger(&ProgressionLedger::new())
    }
}

impl StoreDocument {
    pub fn from_ledger(ledger: &ProgressionLedger) -> Self {
        let progress = ledger.progress();
        Self {
            habits: ledger.habits().iter().map(HabitRecord::from).collect(),
            total_xp: progress.total_xp,
            level: progress.level,
            current_hp: progress.current_hp,
            coins: progress.coins,
            exp_needed: progress.exp_needed,
            rewards: ledger.rewards().iter().map(RewardRecord::from).collect(),
        }
    }

    pub fn into_ledger(self) -> ProgressionLedger {
        let progress = Progress {
            total_xp: self.total_xp,
            level: self.level,
            exp_needed: self.exp_needed,
            current_hp: self.current_hp,
            coins: self.coins,
        };
        let habits = self.habits.into_iter().map(HabitRecord::into_habit).collect();
        let rewards = self.rewards.into_iter().map(RewardRecord::into_reward).collect();
        ProgressionLedger::from_parts(habits, rewards, progress)
    }
}

impl From<&Habit> for HabitRecord {
    fn from(habit: &Habit) -> Self {
        Self {
            name: habit.name().to_string(),
            periodicity: Some(habit.periodicity().as_str().to_string()),
            streak: habit.current_streak(),
            last_completed: habit.last_completed().map(timestamp::format),
        }
    }
}

impl HabitRecord {
    fn into_habit(self) -> Habit {
        let periodicity = match self.periodicity.as_deref() {
            None => Periodicity::Daily,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(habit = %self.name, periodicity = raw, "unsupported periodicity, using daily");
                Periodicity::Daily
            }),
        };
        let last_completed = timestamp::parse_lenient(self.last_completed.as_deref(), &self.name);
        Habit::restore(self.name, periodicity, self.streak, last_completed)
    }
}

impl From<&Reward> for RewardRecord {
    fn from(reward: &Reward) -> Self {
        Self {
            name: reward.name.clone(),
            difficulty: Some(reward.difficulty.as_str().to_string()),
            last_exchanged: reward.last_exchanged.map(timestamp::format),
        }
    }
}

impl RewardRecord {
    fn into_reward(self) -> Reward {
        let difficulty = match self.difficulty.as_deref() {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(reward = %self.name, difficulty = raw, "unsupported difficulty, using easy");
                Difficulty::Easy
            }),
            None => Difficulty::Easy,
        };
        let last_exchanged = timestamp::parse_lenient(self.last_exchanged.as_deref(), &self.name);
        Reward {
            name: self.name,
            difficulty,
            last_exchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_document_loads() {
        let json = r#"{
            "habits": [
                {"name": "Push Ups", "habit_type": "daily", "streak": 3, "last_completed": "2025-01-09"},
                {"name": "Budget", "habit_type": "monthly", "streak": 0, "last_completed": null}
            ],
            "total_xp": 40, "level": 2, "current_hp": 15, "coins": 30, "exp_needed": 150,
            "rewards": [{"name": "Cake", "difficulty": "hard", "last_exchanged": "not a date"}]
        }"#;
        let ledger = serde_json::from_str::<StoreDocument>(json).unwrap().into_ledger();

        let pushups = ledger.habit("Push Ups").unwrap();
        assert_eq!(pushups.current_streak(), 3);
        assert_eq!(
            pushups.last_completed().map(timestamp::format).as_deref(),
            Some("2025-01-09 00:00:00")
        );
        assert_eq!(ledger.habit("Budget").unwrap().periodicity(), Periodicity::Daily);

        let cake = ledger.reward("Cake").unwrap();
        assert_eq!(cake.difficulty, Difficulty::Hard);
        assert!(cake.last_exchanged.is_none());

        assert_eq!(ledger.level_and_exp(), (2, 40, 150));
        assert_eq!(ledger.progress().coins, 30);
    }

    #[test]
    fn mistyped_record_values_do_not_drop_the_ledger() {
        let json = r#"{
            "habits": [
                {"name": "Pushups", "periodicity": 7, "streak": 2, "last_completed": 20250109},
                {"name": "Reading", "periodicity": "weekly", "streak": null, "last_completed": "2025-01-06"},
                {"name": "Walk", "streak": "lots", "last_completed": null}
            ],
            "level": 4, "coins": 300, "total_xp": 12, "exp_needed": 250,
            "rewards": [{"name": "Cake", "difficulty": ["hard"], "last_exchanged": false}]
        }"#;
        let ledger = serde_json::from_str::<StoreDocument>(json).unwrap().into_ledger();

        assert_eq!(ledger.level_and_exp(), (4, 12, 250));
        assert_eq!(ledger.progress().coins, 300);
        assert_eq!(ledger.habits().len(), 3);

        let pushups = ledger.habit("Pushups").unwrap();
        assert_eq!(pushups.periodicity(), Periodicity::Daily);
        assert_eq!(pushups.last_completed(), None);
        assert_eq!(pushups.current_streak(), 0);

        // A null streak next to a valid date is repaired to 1
        let reading = ledger.habit("Reading").unwrap();
        assert_eq!(reading.current_streak(), 1);
        assert!(reading.has_completion());

        assert_eq!(ledger.habit("Walk").unwrap().current_streak(), 0);

        let cake = ledger.reward("Cake").unwrap();
        assert_eq!(cake.difficulty, Difficulty::Easy);
        assert!(cake.last_exchanged.is_none());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let doc: StoreDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, StoreDocument::default());
        assert_eq!(doc.level, 1);
        assert_eq!(doc.current_hp, 10);
        assert_eq!(doc.exp_needed, 100);
    }

    #[test]
    fn writes_current_key_names() {
        let mut ledger = ProgressionLedger::new();
        ledger.add_habit("Reading", Periodicity::Weekly).unwrap();
        let json = serde_json::to_value(StoreDocument::from_ledger(&ledger)).unwrap();
        assert_eq!(json["habits"][0]["periodicity"], "weekly");
        assert_eq!(json["habits"][0]["last_completed"], serde_json::Value::Null);
        assert!(json["habits"][0].get("habit_type").is_none());
        assert_eq!(json["exp_needed"], 100);
    }
}
