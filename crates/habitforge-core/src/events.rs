use chrono::NaiveDateTime;
use serde::Serialize;

use crate::habit::CompletionKind;
use crate::storage::timestamp;

/// Every progression change produces an Event.
/// Front ends render them; the ledger itself never prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    HabitCompleted {
        habit: String,
        kind: CompletionKind,
        streak: u32,
        xp_gained: u32,
        coins_gained: u32,
        #[serde(serialize_with = "timestamp::serialize")]
        at: NaiveDateTime,
    },
    /// One event per level gained, in order.
    LeveledUp {
        level: u32,
        current_hp: u32,
        exp_needed: u32,
    },
    RewardExchanged {
        reward: String,
        cost: u32,
        #[serde(serialize_with = "timestamp::serialize")]
        at: NaiveDateTime,
    },
}

impl Event {
    /// One-line summary for terminal output.
    pub fn describe(&self) -> String {
        match self {
            Event::HabitCompleted {
                xp_gained,
                coins_gained,
                ..
            } => format!("You gained {xp_gained} XP and {coins_gained} coins!"),
            Event::LeveledUp {
                level, current_hp, ..
            } => format!(
                "Congratulations! You leveled up to Level {level}. Your HP is now {current_hp}!"
            ),
            Event::RewardExchanged { reward, cost, .. } => {
                format!("You exchanged {cost} XP for {reward}!")
            }
        }
    }
}
