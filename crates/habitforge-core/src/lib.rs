//! # Habitforge Core Library
//!
//! This library provides the core logic for the Habitforge habit tracker.
//! Every front end (the `habitforge` CLI, a desktop GUI) is a thin layer over
//! the same [`Tracker`].
//!
//! ## Architecture
//!
//! - **Habit**: streak state machine for one daily or weekly habit
//! - **Ledger**: XP, level, HP, coins and the reward catalog, with no I/O
//! - **Tracker**: runs ledger operations and writes through to a store
//! - **Storage**: JSON ledger file and TOML configuration
//!
//! ## Key Components
//!
//! - [`Habit`]: completion algorithm and XP calculation
//! - [`ProgressionLedger`]: level-up resolution and reward redemption
//! - [`Tracker`]: collaborator-facing operations
//! - [`LedgerStore`]: persistence hook

pub mod error;
pub mod events;
pub mod habit;
pub mod ledger;
pub mod reward;
pub mod storage;
pub mod tracker;

pub use error::{ConfigError, CoreError, LedgerError, StoreError, ValidationError};
pub use events::Event;
pub use habit::{Completion, CompletionKind, Habit, Periodicity};
pub use ledger::{MarkOutcome, Progress, ProgressionLedger, ProgressionRules, Statistics, XpOverflow};
pub use reward::{Difficulty, Redemption, Reward};
pub use storage::{Config, JsonFileStore, LedgerStore, MemoryStore};
pub use tracker::Tracker;
