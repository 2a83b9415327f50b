use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sim::MatchMode;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    pub time: DateTime<Utc>,
}

impl HighScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
            time: Utc::now(),
        }
    }
}

/// Best scores per match mode, each list sorted by score descending.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScoreTable {
    #[serde(default)]
    pub single: Vec<HighScoreEntry>,
    #[serde(default)]
    pub multi: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    pub fn entries(&self, mode: MatchMode) -> &[HighScoreEntry] {
        match mode {
            MatchMode::Single => &self.single,
            MatchMode::Multi => &self.multi,
        }
    }

    fn entries_mut(&mut self, mode: MatchMode) -> &mut Vec<HighScoreEntry> {
        match mode {
            MatchMode::Single => &mut self.single,
            MatchMode::Multi => &mut self.multi,
        }
    }

    /// Inserts and trims to `retain`. Returns the entry's rank (0-based), or `None` if it fell off.
    pub fn insert(&mut self, mode: MatchMode, entry: HighScoreEntry, retain: usize) -> Option<usize> {
        let entries = self.entries_mut(mode);
        let rank = entries
            .iter()
            .position(|existing| entry.score > existing.score)
            .unwrap_or(entries.len());
        entries.insert(rank, entry);
        entries.truncate(retain);
        (rank < entries.len()).then_some(rank)
    }

    /// Re-sorts and trims lists loaded from an edited file.
    pub(crate) fn normalize(&mut self, retain: usize) {
        for entries in [&mut self.single, &mut self.multi] {
            entries.sort_by(|a, b| b.score.cmp(&a.score));
            entries.truncate(retain);
        }
    }
}
