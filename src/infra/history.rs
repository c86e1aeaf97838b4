use crate::domain::models::HistoryEntry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Ordered record of every episode downloaded so far.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn urls(&self) -> HashSet<&str> {
        self.entries.iter().map(|entry| entry.url.as_str()).collect()
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.entries.iter().any(|entry| entry.url == url)
    }

    /// Appends an entry. Returns false if its URL is already recorded.
    pub fn record(&mut self, entry: HistoryEntry) -> bool {
        if self.contains_url(&entry.url) {
            return false;
        }
        self.entries.push(entry);
        true
    }
}

impl From<Vec<HistoryEntry>> for History {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let mut history = History::default();
        for entry in entries {
            let url = entry.url.clone();
            if !history.record(entry) {
                log::warn!("Dropping duplicate history entry for {url}");
            }
        }
        history
    }
}

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the history file. A missing or unreadable file yields an empty history.
    pub fn load(&self) -> History {
        if !self.path.exists() {
            log::info!(
                "No history at {}, starting with an empty one",
                self.path.display()
            );
            return History::default();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Failed to read history {}: {e}", self.path.display());
                return History::default();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&content) {
            Ok(entries) => History::from(entries),
            Err(e) => {
                log::warn!("Invalid history JSON in {}: {e}", self.path.display());
                History::default()
            }
        }
    }

    /// Rewrites the whole history file through a temporary file and rename.
    pub fn save(&self, history: &History) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Create parent directory if it doesn't exist
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;

        let content = serde_json::to_string_pretty(history)?;
        let mut temp = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path)
            .with_context(|| format!("Failed to write history {}", self.path.display()))?;
        Ok(())
    }
}
