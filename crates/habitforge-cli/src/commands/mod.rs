pub mod config;
pub mod habit;
pub mod menu;
pub mod reward;
pub mod stats;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use habitforge_core::{Config, JsonFileStore, Tracker};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the tracker on `data`, or on the configured ledger file.
pub fn open_tracker(
    data: Option<PathBuf>,
) -> Result<Tracker<JsonFileStore>, Box<dyn std::error::Error>> {
    let store = match data {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::open_default()?,
    };
    tracing::debug!(path = %store.path().display(), "opening ledger");
    Ok(Tracker::open(store, Config::load_or_default().rules()))
}

/// Ask a yes/no question. Only "yes" or "y" confirms.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> std::io::Result<bool> {
    write!(output, "{question} (yes/no): ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "yes" | "y"))
}
