//! Interactive numbered menu over a tracker.
//!
//! Every choice accepts either its number or its word ("2" or "statistics").
//! End of input leaves the menu.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use habitforge_core::{CoreError, Difficulty, LedgerStore, Periodicity, Tracker};

use super::habit::{habit_line, outcome_lines};
use super::reward::reward_line;
use super::stats::level_line;
use super::{confirm, open_tracker, CmdResult};

pub fn run(data: Option<PathBuf>) -> CmdResult {
    let mut tracker = open_tracker(data)?;
    let stdin = std::io::stdin();
    let mut menu = Menu {
        tracker: &mut tracker,
        input: stdin.lock(),
        output: std::io::stdout(),
    };
    menu.main_loop()
}

pub struct Menu<'a, S: LedgerStore, R, W> {
    pub tracker: &'a mut Tracker<S>,
    pub input: R,
    pub output: W,
}

fn choice_is(choice: &str, number: &str, word: &str) -> bool {
    choice == number || choice == word
}

impl<S: LedgerStore, R: BufRead, W: Write> Menu<'_, S, R, W> {
    /// Print `text` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Print rejections and keep going; store failures end the session.
    fn report<T>(&mut self, result: Result<T, CoreError>) -> Result<Option<T>, Box<dyn std::error::Error>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(CoreError::Store(e)) => Err(e.into()),
            Err(e) => {
                writeln!(self.output, "Error: {e}")?;
                Ok(None)
            }
        }
    }

    pub fn main_loop(&mut self) -> CmdResult {
        loop {
            writeln!(self.output, "\n--- Habit Tracker Menu ---")?;
            writeln!(self.output, "{}", level_line(self.tracker.level_and_exp()))?;
            writeln!(self.output, "1. Habits Management")?;
            writeln!(self.output, "2. Statistics")?;
            writeln!(self.output, "3. Rewards")?;
            writeln!(self.output, "4. Exit")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(());
            };
            let choice = choice.to_ascii_lowercase();

            if choice_is(&choice, "1", "habits") {
                if !self.habits_loop()? {
                    return Ok(());
                }
            } else if choice_is(&choice, "2", "statistics") {
                let stats = self.tracker.view_statistics();
                writeln!(self.output, "{stats}")?;
            } else if choice_is(&choice, "3", "rewards") {
                if !self.rewards_loop()? {
                    return Ok(());
                }
            } else if choice_is(&choice, "4", "exit") {
                writeln!(self.output, "Goodbye!")?;
                return Ok(());
            } else {
                writeln!(self.output, "Invalid option, please try again.")?;
            }
        }
    }

    /// Returns `false` when input ran out.
    fn habits_loop(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        loop {
            writeln!(self.output, "\n--- Habits Management ---")?;
            writeln!(self.output, "1. Create Habit")?;
            writeln!(self.output, "2. Delete Habit")?;
            writeln!(self.output, "3. Mark Habit as completed")?;
            writeln!(self.output, "4. View Habits")?;
            writeln!(self.output, "5. Back to Main Menu")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(false);
            };
            let choice = choice.to_ascii_lowercase();

            if choice_is(&choice, "1", "create") {
                let Some(name) = self.prompt("Enter habit name: ")? else {
                    return Ok(false);
                };
                let Some(raw) = self.prompt("Periodicity (1. daily, 2. weekly): ")? else {
                    return Ok(false);
                };
                let periodicity = match raw.as_str() {
                    "1" => Ok(Periodicity::Daily),
                    "2" => Ok(Periodicity::Weekly),
                    other => other.parse::<Periodicity>(),
                };
                let result = periodicity
                    .map_err(CoreError::from)
                    .and_then(|p| self.tracker.add_habit(&name, p));
                if self.report(result)?.is_some() {
                    writeln!(self.output, "Habit created successfully!")?;
                }
            } else if choice_is(&choice, "2", "delete") {
                let Some(name) = self.prompt("Enter habit name to delete: ")? else {
                    return Ok(false);
                };
                let question = format!("Are you sure you want to delete the habit '{name}'?");
                if !confirm(&mut self.input, &mut self.output, &question)? {
                    writeln!(self.output, "Habit deletion canceled.")?;
                    continue;
                }
                let result = self.tracker.delete_habit(&name);
                match self.report(result)? {
                    Some(true) => writeln!(self.output, "Habit '{name}' deleted successfully!")?,
                    Some(false) => writeln!(self.output, "Habit not found!")?,
                    None => {}
                }
            } else if choice_is(&choice, "3", "mark") {
                let Some(name) = self.prompt("Enter habit name to mark as complete: ")? else {
                    return Ok(false);
                };
                let result = self.tracker.mark_habit(&name);
                if let Some(outcome) = self.report(result)? {
                    for line in outcome_lines(&outcome) {
                        writeln!(self.output, "{line}")?;
                    }
                }
            } else if choice_is(&choice, "4", "view") {
                if self.tracker.habits().is_empty() {
                    writeln!(self.output, "No habits available.")?;
                }
                for habit in self.tracker.habits() {
                    writeln!(self.output, "{}", habit_line(habit))?;
                }
            } else if choice_is(&choice, "5", "back") {
                return Ok(true);
            } else {
                writeln!(self.output, "Invalid option, please try again.")?;
            }
        }
    }

    /// Returns `false` when input ran out.
    fn rewards_loop(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        loop {
            writeln!(self.output, "\n--- Rewards Management ---")?;
            writeln!(self.output, "1. Create Reward")?;
            writeln!(self.output, "2. Delete Reward")?;
            writeln!(self.output, "3. Exchange Reward")?;
            writeln!(self.output, "4. View Rewards")?;
            writeln!(self.output, "5. Back to Main Menu")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(false);
            };
            let choice = choice.to_ascii_lowercase();

            if choice_is(&choice, "1", "create") {
                let Some(name) = self.prompt("Enter reward name: ")? else {
                    return Ok(false);
                };
                let Some(raw) = self.prompt("Enter reward difficulty (easy, medium, hard): ")? else {
                    return Ok(false);
                };
                let result = raw
                    .parse::<Difficulty>()
                    .map_err(CoreError::from)
                    .and_then(|d| self.tracker.create_reward(&name, d));
                if self.report(result)?.is_some() {
                    writeln!(self.output, "Reward created successfully!")?;
                }
            } else if choice_is(&choice, "2", "delete") {
                let Some(name) = self.prompt("Enter reward name to delete: ")? else {
                    return Ok(false);
                };
                let result = self.tracker.delete_reward(&name);
                match self.report(result)? {
                    Some(true) => writeln!(self.output, "Reward deleted successfully!")?,
                    Some(false) => writeln!(self.output, "Reward not found!")?,
                    None => {}
                }
            } else if choice_is(&choice, "3", "exchange") {
                let Some(name) = self.prompt("Enter reward name to exchange: ")? else {
                    return Ok(false);
                };
                let result = self.tracker.exchange_reward(&name);
                if let Some(redemption) = self.report(result)? {
                    writeln!(self.output, "{}", redemption.event().describe())?;
                }
            } else if choice_is(&choice, "4", "view") {
                if self.tracker.rewards().is_empty() {
                    writeln!(self.output, "No rewards available.")?;
                }
                for reward in self.tracker.rewards() {
                    writeln!(self.output, "{}", reward_line(reward))?;
                }
            } else if choice_is(&choice, "5", "back") {
                return Ok(true);
            } else {
                writeln!(self.output, "Invalid option, please try again.")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitforge_core::{MemoryStore, ProgressionRules};

    fn run_script(tracker: &mut Tracker<MemoryStore>, script: &str) -> String {
        let mut output = Vec::new();
        let mut menu = Menu {
            tracker,
            input: script.as_bytes(),
            output: &mut output,
        };
        menu.main_loop().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn create_mark_and_view_habit() {
        let mut tracker = Tracker::open(MemoryStore::new(), ProgressionRules::default());
        let out = run_script(
            &mut tracker,
            "habits\n1\nPushups\n1\n3\nPushups\n3\nPushups\n4\nback\nexit\n",
        );
        assert!(out.contains("Habit created successfully!"));
        assert!(out.contains("First completion! Streak started."));
        assert!(out.contains("You gained 10 XP and 10 coins!"));
        assert!(out.contains("Already completed today."));
        assert!(out.contains("Habit: Pushups, Type: daily, Streak: 1"));
        assert!(out.contains("Goodbye!"));
        assert_eq!(tracker.level_and_exp(), (1, 10, 100));
    }

    #[test]
    fn invalid_periodicity_is_rejected() {
        let mut tracker = Tracker::open(MemoryStore::new(), ProgressionRules::default());
        let out = run_script(&mut tracker, "1\ncreate\nBudget\nmonthly\n5\n4\n");
        assert!(out.contains("Unknown periodicity 'monthly'"));
        assert!(tracker.habits().is_empty());
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut tracker = Tracker::open(MemoryStore::new(), ProgressionRules::default());
        tracker.add_habit("Walk", Periodicity::Daily).unwrap();
        let out = run_script(&mut tracker, "1\n2\nWalk\nno\n2\nWalk\nyes\n");
        assert!(out.contains("Habit deletion canceled."));
        assert!(out.contains("Habit 'Walk' deleted successfully!"));
        assert!(tracker.habits().is_empty());
    }

    #[test]
    fn reward_flow_reports_shortfall() {
        let mut tracker = Tracker::open(MemoryStore::new(), ProgressionRules::default());
        let out = run_script(
            &mut tracker,
            "rewards\n1\nCake\nlegendary\n1\nCake\neasy\n3\nCake\n4\n3\nNope\n5\n2\n4\n",
        );
        assert!(out.contains("Unknown difficulty 'legendary'"));
        assert!(out.contains("Reward created successfully!"));
        assert!(out.contains("Not enough XP to exchange 'Cake': costs 50, you have 0"));
        assert!(out.contains("Reward: Cake, Difficulty: easy (50 XP), Last Exchanged: Never"));
        assert!(out.contains("Reward 'Nope' not found"));
        assert!(out.contains("--- Statistics ---"));
    }
}
