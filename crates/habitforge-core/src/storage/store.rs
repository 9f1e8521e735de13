//! Ledger persistence backends.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::ledger::ProgressionLedger;

use super::document::StoreDocument;

/// Load/save hook for a [`ProgressionLedger`].
///
/// `load` returns `Ok(None)` when nothing has been stored yet.
pub trait LedgerStore {
    fn load(&self) -> Result<Option<ProgressionLedger>, StoreError>;
    fn save(&mut self, ledger: &ProgressionLedger) -> Result<(), StoreError>;
}

/// JSON file store, by default `~/.config/habitforge/habits.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured path, or `habits.json` in the data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let config = super::Config::load_or_default();
        Ok(Self::new(config.store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<Option<ProgressionLedger>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let document: StoreDocument =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(document.into_ledger()))
    }

    /// Write the whole document to a sibling temp file, then rename it over
    /// the target.
    fn save(&mut self, ledger: &ProgressionLedger) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&StoreDocument::from_ledger(ledger))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), "ledger saved");
        Ok(())
    }
}

/// In-memory store holding the serialized document. Counts saves so
/// write-through behavior can be observed.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    content: Option<String>,
    saves: usize,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a JSON document.
    pub fn with_json(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Store whose every save fails.
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Option<ProgressionLedger>, StoreError> {
        let Some(content) = &self.content else {
            return Ok(None);
        };
        let document: StoreDocument =
            serde_json::from_str(content).map_err(|source| StoreError::Parse {
                path: PathBuf::from("<memory>"),
                source,
            })?;
        Ok(Some(document.into_ledger()))
    }

    fn save(&mut self, ledger: &ProgressionLedger) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Io {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::new(ErrorKind::PermissionDenied, "store is read-only"),
            });
        }
        self.content = Some(serde_json::to_string(&StoreDocument::from_ledger(ledger))?);
        self.saves += 1;
        Ok(())
    }
}
