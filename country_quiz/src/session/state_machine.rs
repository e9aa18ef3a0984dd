//! The quiz session: clock, phase and discovered countries.

use super::{
    discovered::DiscoveredSet,
    errors::SessionError,
    phases::{Ended, Idle, Paused, PhaseRules, Running, SessionPhase},
};
use crate::{
    catalog::{Catalog, CountryId},
    events::{EndReason, QuizEvent},
};
use log::{debug, info};
use std::collections::VecDeque;

/// Default session length: 15 minutes
pub const DEFAULT_TOTAL_SECS: u32 = 15 * 60;

/// Result of a guess that named a catalog country
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Discovery {
    /// Newly added to the discovered set
    New,
    /// Already in the discovered set; nothing changed
    AlreadyFound,
    /// Newly added, and it was the last undiscovered country
    Completed,
}

/// Result of a clock tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    /// The session is not running; the tick was dropped
    Ignored,
    Counting { remaining_secs: u32 },
    /// The clock hit zero and the session ended
    Expired { score: usize },
}

/// State of one quiz session.
///
/// All mutation happens through the transition methods below, each of which
/// queues the matching [`QuizEvent`]s for [`Session::drain_events`].
#[derive(Debug)]
pub struct Session {
    total_secs: u32,
    remaining_secs: u32,
    phase: SessionPhase,
    discovered: DiscoveredSet,
    events: VecDeque<QuizEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_SECS)
    }
}

impl Session {
    #[must_use]
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            phase: SessionPhase::default(),
            discovered: DiscoveredSet::new(),
            events: VecDeque::new(),
        }
    }

    /// Idle → Running. Returns whether the phase changed.
    ///
    /// Starting an already running session is a no-op. Focus does not
    /// unpause, so starting while paused or over is also a no-op.
    pub fn start(&mut self) -> bool {
        match self.phase {
            SessionPhase::Idle(_) => {
                self.set_phase(Running.into());
                self.events.push_back(QuizEvent::Started);
                true
            }
            _ => false,
        }
    }

    /// Idle | Running → Paused, keeping the remaining time.
    ///
    /// Returns whether the phase changed; pausing twice is a no-op.
    pub fn pause(&mut self) -> Result<bool, SessionError> {
        match self.phase {
            SessionPhase::Idle(_) | SessionPhase::Running(_) => {
                self.set_phase(Paused.into());
                self.events.push_back(QuizEvent::Paused);
                Ok(true)
            }
            SessionPhase::Paused(_) => Ok(false),
            SessionPhase::Ended(_) => Err(SessionError::transition("pause", self.phase.label())),
        }
    }

    /// Paused → Running from the preserved remaining time.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Paused(_) => {
                self.set_phase(Running.into());
                self.events.push_back(QuizEvent::Resumed);
                Ok(())
            }
            _ => Err(SessionError::transition("resume", self.phase.label())),
        }
    }

    /// Record a correctly named country.
    ///
    /// A guess while idle starts the session first. Discovering the last
    /// remaining country ends the session.
    pub fn discover(&mut self, catalog: &Catalog, id: &str) -> Result<Discovery, SessionError> {
        if !self.phase.accepts_input() {
            return Err(SessionError::InputDisabled {
                phase: self.phase.label().to_string(),
            });
        }
        let country = catalog
            .get(id)
            .ok_or_else(|| SessionError::UnknownCountry(CountryId::new(id)))?;

        self.start();

        if !self.discovered.insert(country.id.clone()) {
            return Ok(Discovery::AlreadyFound);
        }

        debug!("Discovered {} ({})", country.name, country.id);
        self.events.push_back(QuizEvent::Discovered {
            id: country.id.clone(),
            name: country.name.clone(),
        });

        if self.discovered.len() == catalog.len() {
            self.finish(EndReason::AllFound);
            return Ok(Discovery::Completed);
        }

        Ok(Discovery::New)
    }

    /// Advance the clock by one second. Only a running session counts down.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.phase.clock_runs() {
            return TickOutcome::Ignored;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.events.push_back(QuizEvent::Tick {
            remaining_secs: self.remaining_secs,
        });

        if self.remaining_secs == 0 {
            let score = self.finish(EndReason::TimeUp);
            return TickOutcome::Expired { score };
        }

        TickOutcome::Counting {
            remaining_secs: self.remaining_secs,
        }
    }

    /// Back to idle with the full clock and nothing discovered.
    pub fn reset(&mut self) {
        self.discovered.clear();
        self.remaining_secs = self.total_secs;
        self.set_phase(Idle.into());
        self.events.push_back(QuizEvent::Reset);
    }

    pub fn drain_events(&mut self) -> VecDeque<QuizEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.phase.accepts_input()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, SessionPhase::Ended(_))
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    #[must_use]
    pub fn discovered(&self) -> &DiscoveredSet {
        &self.discovered
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.discovered.len()
    }

    fn finish(&mut self, reason: EndReason) -> usize {
        let score = self.discovered.len();
        self.set_phase(Ended { score }.into());
        info!("Session over ({reason:?}) with {score} countries");
        self.events.push_back(QuizEvent::Ended { score, reason });
        score
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        debug!("Session phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Continent, Country};

    fn catalog(n: usize) -> Catalog {
        Catalog::new(
            (0..n)
                .map(|i| Country {
                    id: CountryId::new(&format!("{i:03}")),
                    name: format!("Country {i}"),
                    continent: Continent::Asia,
                    alternates: Vec::new(),
                    lat: 0.0,
                    lon: 0.0,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_session_is_idle_with_full_clock() {
        let session = Session::default();
        assert_eq!(session.phase(), SessionPhase::Idle(Idle));
        assert_eq!(session.remaining_secs(), 900);
        assert!(session.accepts_input());
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut session = Session::new(10);
        assert!(session.start());
        assert!(!session.start());
        session.pause().unwrap();
        assert!(!session.start());
        assert_eq!(session.phase(), SessionPhase::Paused(Paused));
    }

    #[test]
    fn test_idle_ticks_are_ignored() {
        let mut session = Session::new(10);
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.remaining_secs(), 10);
    }

    #[test]
    fn test_pause_preserves_remaining_time() {
        let mut session = Session::new(10);
        session.start();
        session.tick();
        session.tick();
        assert!(session.pause().unwrap());
        assert!(!session.pause().unwrap());
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.remaining_secs(), 8);

        session.resume().unwrap();
        assert_eq!(
            session.tick(),
            TickOutcome::Counting { remaining_secs: 7 }
        );
    }

    #[test]
    fn test_paused_session_rejects_guesses() {
        let catalog = catalog(3);
        let mut session = Session::new(10);
        session.pause().unwrap();
        let err = session.discover(&catalog, "000").unwrap_err();
        assert!(matches!(err, SessionError::InputDisabled { .. }));
        assert!(session.discovered().is_empty());
    }

    #[test]
    fn test_resume_requires_pause() {
        let mut session = Session::new(10);
        assert!(matches!(
            session.resume(),
            Err(SessionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_guess_while_idle_starts_session() {
        let catalog = catalog(3);
        let mut session = Session::new(10);
        assert_eq!(session.discover(&catalog, "001").unwrap(), Discovery::New);
        assert_eq!(session.phase(), SessionPhase::Running(Running));
    }

    #[test]
    fn test_duplicate_discovery_is_noop() {
        let catalog = catalog(3);
        let mut session = Session::new(10);
        session.discover(&catalog, "001").unwrap();
        assert_eq!(
            session.discover(&catalog, "001").unwrap(),
            Discovery::AlreadyFound
        );
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_unknown_ids_are_rejected() {
        let catalog = catalog(3);
        let mut session = Session::new(10);
        let err = session.discover(&catalog, "999").unwrap_err();
        assert_eq!(err, SessionError::UnknownCountry(CountryId::new("999")));
        assert!(session.discovered().is_empty());
    }

    #[test]
    fn test_countdown_expires_after_total_ticks() {
        let mut session = Session::new(900);
        session.start();
        for expected in (1..900).rev() {
            assert_eq!(
                session.tick(),
                TickOutcome::Counting {
                    remaining_secs: expected
                }
            );
        }
        assert_eq!(session.tick(), TickOutcome::Expired { score: 0 });
        assert_eq!(session.remaining_secs(), 0);
        assert!(session.is_over());
        assert!(!session.accepts_input());
        assert_eq!(session.tick(), TickOutcome::Ignored);
    }

    #[test]
    fn test_ended_session_cannot_pause_or_resume() {
        let mut session = Session::new(1);
        session.start();
        session.tick();
        assert!(session.pause().is_err());
        assert!(session.resume().is_err());
    }

    #[test]
    fn test_discovering_everything_ends_session() {
        let catalog = catalog(2);
        let mut session = Session::new(10);
        session.discover(&catalog, "000").unwrap();
        assert_eq!(
            session.discover(&catalog, "001").unwrap(),
            Discovery::Completed
        );
        assert_eq!(session.phase(), SessionPhase::Ended(Ended { score: 2 }));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let catalog = catalog(3);
        let mut session = Session::new(10);
        session.discover(&catalog, "000").unwrap();
        session.tick();
        session.pause().unwrap();

        session.reset();
        assert!(session.discovered().is_empty());
        assert_eq!(session.remaining_secs(), 10);
        assert_eq!(session.phase(), SessionPhase::Idle(Idle));
        assert!(session.accepts_input());
    }

    #[test]
    fn test_events_are_queued_in_order() {
        let catalog = catalog(3);
        let mut session = Session::new(2);
        session.discover(&catalog, "002").unwrap();
        session.tick();
        session.tick();

        let events: Vec<QuizEvent> = session.drain_events().into();
        assert_eq!(
            events,
            [
                QuizEvent::Started,
                QuizEvent::Discovered {
                    id: CountryId::new("002"),
                    name: "Country 2".to_string()
                },
                QuizEvent::Tick { remaining_secs: 1 },
                QuizEvent::Tick { remaining_secs: 0 },
                QuizEvent::Ended {
                    score: 1,
                    reason: EndReason::TimeUp
                },
            ]
        );
        assert!(session.drain_events().is_empty());
    }
}
