//! Habit management commands for CLI.

use std::path::PathBuf;

use clap::Subcommand;
use habitforge_core::storage::timestamp;
use habitforge_core::{Habit, MarkOutcome, Periodicity};

use super::{confirm, open_tracker, CmdResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,
        /// daily or weekly (default: daily)
        #[arg(long, short, default_value = "daily")]
        periodicity: String,
    },
    /// Delete a habit
    Delete {
        /// Habit name
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Mark a habit as completed now
    Mark {
        /// Habit name
        name: String,
    },
    /// List habits
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: HabitAction, data: Option<PathBuf>) -> CmdResult {
    let mut tracker = open_tracker(data)?;

    match action {
        HabitAction::Add { name, periodicity } => {
            let periodicity: Periodicity = periodicity.parse()?;
            tracker.add_habit(name.trim(), periodicity)?;
            println!("Habit '{}' created ({periodicity}).", name.trim());
        }
        HabitAction::Delete { name, yes } => {
            let name = name.trim();
            let question = format!("Are you sure you want to delete the habit '{name}'?");
            let confirmed =
                yes || confirm(&mut std::io::stdin().lock(), &mut std::io::stdout(), &question)?;
            if !confirmed {
                println!("Habit deletion canceled.");
                return Ok(());
            }
            if tracker.delete_habit(name)? {
                println!("Habit '{name}' deleted.");
            } else {
                println!("No habit named '{name}'.");
            }
        }
        HabitAction::Mark { name } => {
            let outcome = tracker.mark_habit(name.trim())?;
            for line in outcome_lines(&outcome) {
                println!("{line}");
            }
        }
        HabitAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tracker.habits())?);
            } else if tracker.habits().is_empty() {
                println!("No habits available.");
            } else {
                for habit in tracker.habits() {
                    println!("{}", habit_line(habit));
                }
            }
        }
    }
    Ok(())
}

/// Completion message followed by one line per event.
pub fn outcome_lines(outcome: &MarkOutcome) -> Vec<String> {
    std::iter::once(outcome.completion.message.clone())
        .chain(outcome.events.iter().map(|e| e.describe()))
        .collect()
}

pub fn habit_line(habit: &Habit) -> String {
    let last = habit
        .last_completed()
        .map(timestamp::format)
        .unwrap_or_else(|| "Not completed yet".to_string());
    format!(
        "Habit: {}, Type: {}, Streak: {}, Last Completed: {}",
        habit.name(),
        habit.periodicity(),
        habit.current_streak(),
        last
    )
}
