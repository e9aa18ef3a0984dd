//! Session phases.
//!
//! Each phase is its own type; [`SessionPhase`] dispatches the shared
//! [`PhaseRules`] to whichever one is current.

use enum_dispatch::enum_dispatch;

/// What a phase allows
#[enum_dispatch]
pub trait PhaseRules {
    /// Whether guesses are processed
    fn accepts_input(&self) -> bool;

    /// Whether the countdown should be running
    fn clock_runs(&self) -> bool;

    fn label(&self) -> &'static str;
}

/// Not started yet; the first focus or guess starts the clock
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Idle;

/// Clock counting down, guesses accepted
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Running;

/// Clock frozen, guesses rejected
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Paused;

/// Game over; only a reset leaves this phase
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ended {
    pub score: usize,
}

impl PhaseRules for Idle {
    fn accepts_input(&self) -> bool {
        true
    }

    fn clock_runs(&self) -> bool {
        false
    }

    fn label(&self) -> &'static str {
        "idle"
    }
}

impl PhaseRules for Running {
    fn accepts_input(&self) -> bool {
        true
    }

    fn clock_runs(&self) -> bool {
        true
    }

    fn label(&self) -> &'static str {
        "running"
    }
}

impl PhaseRules for Paused {
    fn accepts_input(&self) -> bool {
        false
    }

    fn clock_runs(&self) -> bool {
        false
    }

    fn label(&self) -> &'static str {
        "paused"
    }
}

impl PhaseRules for Ended {
    fn accepts_input(&self) -> bool {
        false
    }

    fn clock_runs(&self) -> bool {
        false
    }

    fn label(&self) -> &'static str {
        "over"
    }
}

#[enum_dispatch(PhaseRules)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionPhase {
    Idle,
    Running,
    Paused,
    Ended,
}

impl Default for SessionPhase {
    fn default() -> Self {
        Idle.into()
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
