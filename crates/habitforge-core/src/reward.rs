//! Redeemable rewards and their XP costs.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::timestamp;

/// Reward tier, each with a fixed XP cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn cost(self) -> u32 {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Medium => 100,
            Difficulty::Hard => 150,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ValidationError::UnknownDifficulty(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reward {
    pub name: String,
    pub difficulty: Difficulty,
    #[serde(serialize_with = "timestamp::serialize_opt")]
    pub last_exchanged: Option<NaiveDateTime>,
}

impl Reward {
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            difficulty,
            last_exchanged: None,
        }
    }

    pub fn cost(&self) -> u32 {
        self.difficulty.cost()
    }
}

/// A successful reward exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redemption {
    pub reward: String,
    pub cost: u32,
    pub remaining_xp: u32,
    #[serde(serialize_with = "timestamp::serialize")]
    pub exchanged_at: NaiveDateTime,
}

impl Redemption {
    pub fn event(&self) -> Event {
        Event::RewardExchanged {
            reward: self.reward.clone(),
            cost: self.cost,
            at: self.exchanged_at,
        }
    }
}
