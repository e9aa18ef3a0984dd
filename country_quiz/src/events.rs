//! Quiz events and handler registration.
//!
//! The session queues [`QuizEvent`]s as it changes state; the controller
//! drains that queue and hands every event to each registered
//! [`QuizEventHandler`]. Renderers subscribe here instead of being called
//! directly.

use crate::{catalog::CountryId, scores::ScoreRecord};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::mpsc};

/// Why a session ended
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The clock reached zero
    TimeUp,
    /// Every catalog country was discovered
    AllFound,
}

/// Events that occur during a quiz session
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum QuizEvent {
    Started,
    Paused,
    Resumed,
    Tick { remaining_secs: u32 },
    Discovered { id: CountryId, name: String },
    Ended { score: usize, reason: EndReason },
    ScoreRecorded { record: ScoreRecord, rank: Option<usize> },
    Reset,
}

impl fmt::Display for QuizEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Started => "quiz started".to_string(),
            Self::Paused => "quiz paused".to_string(),
            Self::Resumed => "quiz resumed".to_string(),
            Self::Tick { remaining_secs } => format!("{remaining_secs}s left"),
            Self::Discovered { name, .. } => format!("discovered {name}"),
            Self::Ended {
                score,
                reason: EndReason::TimeUp,
            } => format!("time's up with {score} countries"),
            Self::Ended {
                score,
                reason: EndReason::AllFound,
            } => format!("all {score} countries found"),
            Self::ScoreRecorded {
                record,
                rank: Some(rank),
            } => format!("score {} ranked #{}", record.score, rank + 1),
            Self::ScoreRecorded { record, rank: None } => {
                format!("score {} did not make the leaderboard", record.score)
            }
            Self::Reset => "quiz reset".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// Receives quiz events
pub trait QuizEventHandler {
    fn handle(&mut self, event: &QuizEvent);
}

impl<F> QuizEventHandler for F
where
    F: FnMut(&QuizEvent),
{
    fn handle(&mut self, event: &QuizEvent) {
        self(event);
    }
}

impl QuizEventHandler for mpsc::Sender<QuizEvent> {
    fn handle(&mut self, event: &QuizEvent) {
        // A dropped receiver only means nobody is listening anymore.
        let _ = self.send(event.clone());
    }
}

/// Handle returned by [`EventDispatcher::subscribe`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(usize);

/// Fans events out to registered handlers in registration order
#[derive(Default)]
pub struct EventDispatcher {
    next_id: usize,
    handlers: Vec<(SubscriptionId, Box<dyn QuizEventHandler>)>,
}

impl EventDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<H>(&mut self, handler: H) -> SubscriptionId
    where
        H: QuizEventHandler + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn dispatch(&mut self, event: &QuizEvent) {
        for (_, handler) in &mut self.handlers {
            handler.handle(event);
        }
    }

    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
