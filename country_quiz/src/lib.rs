//! # Country Quiz
//!
//! A timed world-countries quiz: the player names as many countries as they
//! can before the clock runs out, and each correct name lights the country
//! up on a map and in a per-continent list.
//!
//! ## Architecture
//!
//! - [`matcher`]: folds case, diacritics and whitespace, then resolves the
//!   guess against canonical names and alternate spellings.
//! - [`session`]: the `Idle → Running ⇄ Paused → Ended` state machine owning
//!   the clock and the discovered set.
//! - [`scores`]: the top-10 leaderboard persisted as one JSON blob.
//! - [`controller`]: wires the pieces together behind a single
//!   [`UiEvent`](controller::UiEvent) entry point and publishes
//!   [`QuizEvent`](events::QuizEvent)s to registered handlers.
//! - [`render`]: the contract map renderers implement and the list views
//!   they draw from.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use country_quiz::{
//!     Catalog, QuizConfig, QuizController,
//!     controller::{Feedback, UiEvent},
//!     scores::MemoryStore,
//!     timer::ManualCountdown,
//! };
//!
//! let catalog = Arc::new(Catalog::builtin().unwrap());
//! let mut quiz = QuizController::new(
//!     catalog,
//!     &QuizConfig::default(),
//!     ManualCountdown::new(),
//!     MemoryStore::new(),
//! );
//!
//! let feedback = quiz.handle(UiEvent::Submit("brasil".to_string()));
//! assert_eq!(feedback, Feedback::Correct("Brasil".to_string()));
//! ```

/// Country catalog loading and lookup.
pub mod catalog;
pub use catalog::{Catalog, Continent, Country, CountryId};

pub mod config;
pub use config::{ConfigError, ConfigOverrides, QuizConfig};

pub mod controller;
pub use controller::{Feedback, QuizController, UiEvent};

pub mod events;
pub mod matcher;
pub mod render;
pub mod scores;
pub mod session;
pub mod timer;
