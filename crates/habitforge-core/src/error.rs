//! Core error types for habitforge-core.
//!
//! This module defines the error hierarchy using thiserror. Ledger errors are
//! business-rule rejections (duplicates, unknown names, insufficient XP) and
//! never leave the ledger in a modified state. Store and config errors wrap
//! the underlying I/O and (de)serialization failures.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitforge-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Business-rule rejection from the ledger
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Persistence errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Rejections raised by [`ProgressionLedger`](crate::ledger::ProgressionLedger)
/// operations. The ledger is unchanged whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("A habit named '{0}' already exists")]
    DuplicateHabit(String),

    #[error("A reward named '{0}' already exists")]
    DuplicateReward(String),

    #[error("Habit '{0}' not found")]
    HabitNotFound(String),

    #[error("Reward '{0}' not found")]
    RewardNotFound(String),

    #[error("Not enough XP to exchange '{reward}': costs {cost}, you have {available}")]
    InsufficientXp {
        reward: String,
        cost: u32,
        available: u32,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read or write the store file
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file exists but is not a valid document
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize the ledger
    #[error("Failed to serialize ledger: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to resolve the data directory
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to resolve the data directory
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Validation errors for user-supplied input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown periodicity '{0}' (expected 'daily' or 'weekly')")]
    UnknownPeriodicity(String),

    #[error("Unknown difficulty '{0}' (expected 'easy', 'medium' or 'hard')")]
    UnknownDifficulty(String),

    #[error("{0} name must not be empty")]
    EmptyName(&'static str),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
