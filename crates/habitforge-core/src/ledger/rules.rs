//! Tunable progression rules and the starting progress values.

use serde::{Deserialize, Serialize};

/// What happens to XP above the level threshold on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XpOverflow {
    /// XP resets to zero; the surplus is lost
    #[default]
    Discard,
    /// The surplus is kept toward the next level
    Carry,
}

/// Progression rules applied by the ledger. Not persisted with the ledger;
/// they come from [`Config`](crate::storage::Config).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRules {
    #[serde(default = "default_coins_per_completion")]
    pub coins_per_completion: u32,
    #[serde(default = "default_hp_per_level")]
    pub hp_per_level: u32,
    #[serde(default = "default_exp_step")]
    pub exp_step: u32,
    #[serde(default)]
    pub xp_overflow: XpOverflow,
}

fn default_coins_per_completion() -> u32 {
    10
}
fn default_hp_per_level() -> u32 {
    5
}
fn default_exp_step() -> u32 {
    50
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            coins_per_completion: default_coins_per_completion(),
            hp_per_level: default_hp_per_level(),
            exp_step: default_exp_step(),
            xp_overflow: XpOverflow::Discard,
        }
    }
}

/// Aggregate progression counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub total_xp: u32,
    pub level: u32,
    pub exp_needed: u32,
    pub current_hp: u32,
    pub coins: u32,
}

pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_HP: u32 = 10;
pub const STARTING_EXP_NEEDED: u32 = 100;

impl Default for Progress {
    fn default() -> Self {
        Self {
            total_xp: 0,
            level: STARTING_LEVEL,
            exp_needed: STARTING_EXP_NEEDED,
            current_hp: STARTING_HP,
            coins: 0,
        }
    }
}

impl Progress {
    /// Clamp values that would break level-up resolution: level and the
    /// threshold are at least 1.
    pub(crate) fn normalized(mut self) -> Self {
        self.level = self.level.max(STARTING_LEVEL);
        self.exp_needed = self.exp_needed.max(1);
        self
    }
}
