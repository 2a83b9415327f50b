use std::path::{Path, PathBuf};

use crate::config::{ContentProvider, FileContentProvider, Serializer, YamlSerializer};
use crate::log;
use crate::sim::MatchMode;
use super::{HighScoreEntry, HighScoreTable};

#[derive(Debug)]
pub enum HighScoreError {
    Io(std::io::Error),
    Serialize(String),
    Deserialize(String),
}

impl std::fmt::Display for HighScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HighScoreError::Io(e) => write!(f, "IO error: {}", e),
            HighScoreError::Serialize(e) => write!(f, "Failed to serialize high scores: {}", e),
            HighScoreError::Deserialize(e) => write!(f, "Failed to read high scores: {}", e),
        }
    }
}

impl std::error::Error for HighScoreError {}

impl From<std::io::Error> for HighScoreError {
    fn from(e: std::io::Error) -> Self {
        HighScoreError::Io(e)
    }
}

/// Where finished rounds get filed.
pub trait ScoreRecorder {
    fn record_score(&mut self, score: u32, label: &str, mode: MatchMode) -> Result<(), HighScoreError>;

    fn high_scores(&mut self) -> Result<HighScoreTable, HighScoreError>;
}

pub struct InMemoryHighScoreStore {
    table: HighScoreTable,
    retain: usize,
}

impl InMemoryHighScoreStore {
    pub fn new(retain: usize) -> Self {
        Self {
            table: HighScoreTable::default(),
            retain: retain.max(1),
        }
    }

    pub fn table(&self) -> &HighScoreTable {
        &self.table
    }
}

impl ScoreRecorder for InMemoryHighScoreStore {
    fn record_score(&mut self, score: u32, label: &str, mode: MatchMode) -> Result<(), HighScoreError> {
        self.table.insert(mode, HighScoreEntry::new(label, score), self.retain);
        Ok(())
    }

    fn high_scores(&mut self) -> Result<HighScoreTable, HighScoreError> {
        Ok(self.table.clone())
    }
}

/// YAML-backed table, loaded on first use. Storage goes through a `ContentProvider`,
/// a file next to the config by default.
pub struct FileHighScoreStore<P: ContentProvider = FileContentProvider> {
    provider: P,
    serializer: YamlSerializer,
    retain: usize,
    table: Option<HighScoreTable>,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>, retain: usize) -> Self {
        Self::with_provider(FileContentProvider::new(path), retain)
    }

    pub fn path(&self) -> &Path {
        self.provider.path()
    }
}

fn storage_error(message: String) -> HighScoreError {
    HighScoreError::Io(std::io::Error::other(message))
}

impl<P: ContentProvider> FileHighScoreStore<P> {
    pub fn with_provider(provider: P, retain: usize) -> Self {
        Self {
            provider,
            serializer: YamlSerializer::new(),
            retain: retain.max(1),
            table: None,
        }
    }

    fn read_table(&self) -> Result<HighScoreTable, HighScoreError> {
        let Some(content) = self.provider.read_content().map_err(storage_error)? else {
            return Ok(HighScoreTable::default());
        };
        if content.trim().is_empty() {
            return Ok(HighScoreTable::default());
        }
        let mut table: HighScoreTable = self
            .serializer
            .deserialize(&content)
            .map_err(HighScoreError::Deserialize)?;
        table.normalize(self.retain);
        Ok(table)
    }

    /// Loads the table if needed. A corrupt document is reported once and replaced by an empty table.
    pub fn load(&mut self) -> Result<&HighScoreTable, HighScoreError> {
        if self.table.is_none() {
            match self.read_table() {
                Ok(table) => self.table = Some(table),
                Err(e @ HighScoreError::Deserialize(_)) => {
                    self.table = Some(HighScoreTable::default());
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(self.table.get_or_insert_with(HighScoreTable::default))
    }

    fn save(&self, table: &HighScoreTable) -> Result<(), HighScoreError> {
        let content = self
            .serializer
            .serialize(table)
            .map_err(HighScoreError::Serialize)?;
        self.provider.write_content(&content).map_err(storage_error)
    }
}

impl<P: ContentProvider> ScoreRecorder for FileHighScoreStore<P> {
    fn record_score(&mut self, score: u32, label: &str, mode: MatchMode) -> Result<(), HighScoreError> {
        match self.load().map(|_| ()) {
            Ok(()) => {}
            Err(e @ HighScoreError::Deserialize(_)) => {
                log!("Discarding unreadable high scores: {}", e);
            }
            Err(e) => return Err(e),
        }
        let mut table = self.table.take().unwrap_or_default();
        let rank = table.insert(mode, HighScoreEntry::new(label, score), self.retain);
        let saved = self.save(&table);
        self.table = Some(table);
        saved?;
        if let Some(rank) = rank {
            log!("{} placed #{} in {} high scores with {}", label, rank + 1, mode, score);
        }
        Ok(())
    }

    fn high_scores(&mut self) -> Result<HighScoreTable, HighScoreError> {
        self.load().cloned()
    }
}
