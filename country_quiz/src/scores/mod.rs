//! Leaderboard of past sessions.
//!
//! [`ScoreBoard`] keeps a [`ScoreHistory`] in sync with a [`KeyValueStore`]
//! under the single key [`SCORES_KEY`]. A blob that fails to parse is
//! treated as an empty history: the problem is logged and the next save
//! overwrites it.
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use country_quiz::scores::{MemoryStore, ScoreBoard, ScoreRecord};
//!
//! let mut board = ScoreBoard::load(MemoryStore::new(), 10);
//! let rank = board.record(ScoreRecord::new(57, Utc::now())).unwrap();
//! assert_eq!(rank, Some(0));
//! ```

pub mod errors;
pub mod models;
pub mod store;

pub use errors::{ScoreError, ScoreResult};
pub use models::{MAX_SCORES, ScoreHistory, ScoreRecord};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use log::{info, warn};

/// Storage key of the persisted history
pub const SCORES_KEY: &str = "country-quiz-scores";

/// Persistent leaderboard
#[derive(Debug)]
pub struct ScoreBoard<S> {
    store: S,
    history: ScoreHistory,
}

impl<S: KeyValueStore> ScoreBoard<S> {
    /// Load the history from `store`, falling back to an empty one when the
    /// stored blob is unreadable or malformed.
    pub fn load(store: S, capacity: usize) -> Self {
        let history = match store.get(SCORES_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<ScoreRecord>>(&blob) {
                Ok(records) => ScoreHistory::from_records(records, capacity),
                Err(e) => {
                    warn!("Discarding malformed score history: {e}");
                    ScoreHistory::with_capacity(capacity)
                }
            },
            Ok(None) => ScoreHistory::with_capacity(capacity),
            Err(e) => {
                warn!("Could not read score history, starting empty: {e}");
                ScoreHistory::with_capacity(capacity)
            }
        };

        Self { store, history }
    }

    /// Append a record, persist, and return its rank.
    ///
    /// The in-memory history is updated even when persisting fails.
    pub fn record(&mut self, record: ScoreRecord) -> ScoreResult<Option<usize>> {
        let score = record.score;
        let rank = self.history.record(record);
        match rank {
            Some(rank) => info!("Recorded score {score} at rank {}", rank + 1),
            None => info!("Score {score} did not make the leaderboard"),
        }
        self.save()?;
        Ok(rank)
    }

    /// Drop every record from memory and storage.
    pub fn clear(&mut self) -> ScoreResult<()> {
        self.history = ScoreHistory::with_capacity(self.history.capacity());
        self.store.remove(SCORES_KEY)
    }

    pub fn save(&mut self) -> ScoreResult<()> {
        let blob = serde_json::to_string(&self.history)?;
        self.store.set(SCORES_KEY, &blob)
    }

    #[must_use]
    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
