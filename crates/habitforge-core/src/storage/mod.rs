mod config;
mod document;
mod store;
pub mod timestamp;

pub use config::{Config, StoreConfig, LEDGER_FILE};
pub use document::{HabitRecord, RewardRecord, StoreDocument};
pub use store::{JsonFileStore, LedgerStore, MemoryStore};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `HABITFORGE_HOME` overrides the location outright. Otherwise the
/// directory is `~/.config/habitforge[-dev]/`, with the `-dev` suffix when
/// `HABITFORGE_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("HABITFORGE_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITFORGE_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("habitforge-dev")
            } else {
                base_dir.join("habitforge")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
