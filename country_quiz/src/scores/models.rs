//! Score history models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of records kept on the leaderboard
pub const MAX_SCORES: usize = 10;

/// One finished session
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScoreRecord {
    /// Countries discovered
    pub score: usize,
    pub date: DateTime<Utc>,
}

impl ScoreRecord {
    #[must_use]
    pub fn new(score: usize, date: DateTime<Utc>) -> Self {
        Self { score, date }
    }
}

/// Bounded leaderboard, sorted by score descending.
///
/// Serializes as a bare JSON array of records.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreHistory {
    records: Vec<ScoreRecord>,
    #[serde(skip, default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    MAX_SCORES
}

impl Default for ScoreHistory {
    fn default() -> Self {
        Self::with_capacity(MAX_SCORES)
    }
}

impl ScoreHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty history keeping at most `capacity` records (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Build from arbitrary records, restoring order and bound.
    #[must_use]
    pub fn from_records(records: Vec<ScoreRecord>, capacity: usize) -> Self {
        let mut history = Self::with_capacity(capacity);
        history.records = records;
        history.normalize();
        history
    }

    /// Insert a record and return its 0-based rank, or `None` when it did
    /// not make the board. Ties keep the older record ahead.
    pub fn record(&mut self, record: ScoreRecord) -> Option<usize> {
        let position = self
            .records
            .iter()
            .position(|existing| existing.score < record.score)
            .unwrap_or(self.records.len());

        if position >= self.capacity {
            return None;
        }

        self.records.insert(position, record);
        self.records.truncate(self.capacity);
        Some(position)
    }

    #[must_use]
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    #[must_use]
    pub fn best(&self) -> Option<&ScoreRecord> {
        self.records.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn normalize(&mut self) {
        // Stable sort keeps insertion order among equal scores.
        self.records.sort_by(|a, b| b.score.cmp(&a.score));
        self.records.truncate(self.capacity);
    }
}
