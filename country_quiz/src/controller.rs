//! The quiz controller.
//!
//! [`QuizController`] owns everything a running quiz needs: the catalog and
//! matcher, the [`Session`], the persistent [`ScoreBoard`], the countdown and
//! the event dispatcher. Frontends feed it [`UiEvent`]s and render from its
//! accessors; every state change is also published to registered handlers.

use crate::{
    catalog::Catalog,
    config::QuizConfig,
    events::{EventDispatcher, QuizEvent, QuizEventHandler, SubscriptionId},
    matcher::Matcher,
    render::{ContinentBlock, continent_blocks},
    scores::{KeyValueStore, ScoreBoard, ScoreHistory, ScoreRecord},
    session::{Discovery, PhaseRules, Session, SessionError, SessionPhase, TickOutcome},
    timer::Countdown,
};
use chrono::Utc;
use log::{debug, error};
use std::{fmt, sync::Arc};

/// Input from the frontend
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UiEvent {
    /// The guess field gained focus (or the player started typing)
    Focus,
    /// The player submitted a guess
    Submit(String),
    Pause,
    Resume,
    Restart,
    /// One second elapsed on the countdown
    Tick,
}

/// Inline, non-fatal feedback for the player
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Feedback {
    /// Nothing to show
    None,
    /// Guess ignored because the quiz is paused or over
    Blocked,
    /// Blank guess
    Empty,
    /// No country matches the guess
    NotFound,
    /// The named country was already discovered
    AlreadyFound(String),
    /// A new country was discovered
    Correct(String),
    /// The session ended; carries the final score and leaderboard rank
    GameOver { score: usize, rank: Option<usize> },
}

impl Feedback {
    /// Whether the frontend should clear the guess field.
    #[must_use]
    pub fn clears_input(&self) -> bool {
        matches!(self, Feedback::Correct(_) | Feedback::GameOver { .. })
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Feedback::Empty | Feedback::NotFound | Feedback::AlreadyFound(_)
        )
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::None | Feedback::Blocked => Ok(()),
            Feedback::Empty => write!(f, "Type a country name."),
            Feedback::NotFound => write!(f, "Country not found. Try another name."),
            Feedback::AlreadyFound(name) => write!(f, "{name} was already discovered!"),
            Feedback::Correct(name) => write!(f, "Correct! {name} ✓"),
            Feedback::GameOver {
                score,
                rank: Some(rank),
            } => write!(f, "Game over: {score} countries, #{} on the leaderboard", rank + 1),
            Feedback::GameOver { score, rank: None } => {
                write!(f, "Game over: {score} countries")
            }
        }
    }
}

/// Owns a quiz session and everything around it
pub struct QuizController<C: Countdown, S: KeyValueStore> {
    catalog: Arc<Catalog>,
    matcher: Matcher,
    session: Session,
    scores: ScoreBoard<S>,
    countdown: C,
    dispatcher: EventDispatcher,
    /// Rank of the most recent finished session
    last_rank: Option<usize>,
}

impl<C: Countdown, S: KeyValueStore> QuizController<C, S> {
    pub fn new(catalog: Arc<Catalog>, config: &QuizConfig, countdown: C, store: S) -> Self {
        Self {
            matcher: Matcher::new(Arc::clone(&catalog)),
            catalog,
            session: Session::new(config.total_secs),
            scores: ScoreBoard::load(store, config.max_scores),
            countdown,
            dispatcher: EventDispatcher::new(),
            last_rank: None,
        }
    }

    /// Register a handler for every future event.
    pub fn subscribe<H>(&mut self, handler: H) -> SubscriptionId
    where
        H: QuizEventHandler + 'static,
    {
        self.dispatcher.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    /// Apply one frontend event.
    pub fn handle(&mut self, event: UiEvent) -> Feedback {
        let feedback = match event {
            UiEvent::Focus => {
                self.session.start();
                Feedback::None
            }
            UiEvent::Submit(input) => self.submit(&input),
            UiEvent::Pause => {
                if let Err(e) = self.session.pause() {
                    debug!("Ignoring pause: {e}");
                }
                Feedback::None
            }
            UiEvent::Resume => {
                if let Err(e) = self.session.resume() {
                    debug!("Ignoring resume: {e}");
                }
                Feedback::None
            }
            UiEvent::Restart => {
                self.session.reset();
                self.last_rank = None;
                Feedback::None
            }
            UiEvent::Tick => match self.session.tick() {
                TickOutcome::Expired { score } => self.record_score(score),
                TickOutcome::Counting { .. } | TickOutcome::Ignored => Feedback::None,
            },
        };

        self.sync_countdown();
        self.flush_events();
        feedback
    }

    fn submit(&mut self, input: &str) -> Feedback {
        if !self.session.accepts_input() {
            return Feedback::Blocked;
        }

        // Any submit counts as the first input action, even an empty one.
        self.session.start();

        if input.trim().is_empty() {
            return Feedback::Empty;
        }

        let Some(country) = self.matcher.find(input) else {
            return Feedback::NotFound;
        };
        let name = country.name.clone();
        let id = country.id.clone();

        match self.session.discover(&self.catalog, id.as_str()) {
            Ok(Discovery::New) => Feedback::Correct(name),
            Ok(Discovery::AlreadyFound) => Feedback::AlreadyFound(name),
            Ok(Discovery::Completed) => self.record_score(self.session.score()),
            Err(SessionError::InputDisabled { .. }) => Feedback::Blocked,
            Err(e) => {
                error!("Matched country rejected by session: {e}");
                Feedback::NotFound
            }
        }
    }

    fn record_score(&mut self, score: usize) -> Feedback {
        // Publish the session's own events (final tick, end) first.
        self.flush_events();

        let record = ScoreRecord::new(score, Utc::now());
        let rank = match self.scores.record(record.clone()) {
            Ok(rank) => rank,
            Err(e) => {
                // The leaderboard in memory is still up to date.
                error!("Failed to persist score history: {e}");
                self.scores
                    .history()
                    .records()
                    .iter()
                    .position(|r| *r == record)
            }
        };
        self.last_rank = rank;
        self.dispatcher
            .dispatch(&QuizEvent::ScoreRecorded { record, rank });
        Feedback::GameOver { score, rank }
    }

    /// Keep exactly one countdown running while the phase needs a clock.
    fn sync_countdown(&mut self) {
        let wanted = self.session.phase().clock_runs();
        if wanted && !self.countdown.is_active() {
            self.countdown.start();
        } else if !wanted && self.countdown.is_active() {
            self.countdown.stop();
        }
    }

    fn flush_events(&mut self) {
        for event in self.session.drain_events() {
            self.dispatcher.dispatch(&event);
        }
    }

    /// Stop the countdown for good.
    pub fn shutdown(&mut self) {
        self.countdown.stop();
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn countdown(&self) -> &C {
        &self.countdown
    }

    #[must_use]
    pub fn leaderboard(&self) -> &ScoreHistory {
        self.scores.history()
    }

    #[must_use]
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    #[must_use]
    pub fn continent_blocks(&self) -> Vec<ContinentBlock<'_>> {
        continent_blocks(&self.catalog, self.session.discovered())
    }

    /// `(discovered, total)`
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.session.score(), self.catalog.len())
    }
}

impl<C: Countdown, S: KeyValueStore> Drop for QuizController<C, S> {
    fn drop(&mut self) {
        self.countdown.stop();
    }
}

impl<C: Countdown, S: KeyValueStore> fmt::Debug for QuizController<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("session", &self.session)
            .field("catalog_len", &self.catalog.len())
            .finish_non_exhaustive()
    }
}
