//! Reward management commands for CLI.

use std::path::PathBuf;

use clap::Subcommand;
use habitforge_core::storage::timestamp;
use habitforge_core::{Difficulty, Reward};

use super::{open_tracker, CmdResult};

#[derive(Subcommand)]
pub enum RewardAction {
    /// Create a new reward
    Create {
        /// Reward name
        name: String,
        /// easy (50 XP), medium (100 XP) or hard (150 XP)
        #[arg(long, short)]
        difficulty: String,
    },
    /// Delete a reward
    Delete {
        /// Reward name
        name: String,
    },
    /// Spend XP on a reward
    Exchange {
        /// Reward name
        name: String,
    },
    /// List rewards
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: RewardAction, data: Option<PathBuf>) -> CmdResult {
    let mut tracker = open_tracker(data)?;

    match action {
        RewardAction::Create { name, difficulty } => {
            let difficulty: Difficulty = difficulty.parse()?;
            tracker.create_reward(name.trim(), difficulty)?;
            println!(
                "Reward '{}' created ({difficulty}, {} XP).",
                name.trim(),
                difficulty.cost()
            );
        }
        RewardAction::Delete { name } => {
            let name = name.trim();
            if tracker.delete_reward(name)? {
                println!("Reward '{name}' deleted.");
            } else {
                println!("No reward named '{name}'.");
            }
        }
        RewardAction::Exchange { name } => {
            let redemption = tracker.exchange_reward(name.trim())?;
            println!("{}", redemption.event().describe());
            println!("Remaining XP: {}", redemption.remaining_xp);
        }
        RewardAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tracker.rewards())?);
            } else if tracker.rewards().is_empty() {
                println!("No rewards available.");
            } else {
                for reward in tracker.rewards() {
                    println!("{}", reward_line(reward));
                }
            }
        }
    }
    Ok(())
}

pub fn reward_line(reward: &Reward) -> String {
    let last = reward
        .last_exchanged
        .map(timestamp::format)
        .unwrap_or_else(|| "Never".to_string());
    format!(
        "Reward: {}, Difficulty: {} ({} XP), Last Exchanged: {}",
        reward.name,
        reward.difficulty,
        reward.cost(),
        last
    )
}
