//! Quiz session state machine.
//!
//! ```text
//! Idle ──start/guess──▶ Running ──pause──▶ Paused
//!   ▲                    │  ▲               │
//!   │                    │  └────resume─────┘
//!   │                 time up / all found
//!   │                    ▼
//!   └──────reset────── Ended
//! ```
//!
//! Reset is accepted from every phase and always lands in `Idle`.

pub mod discovered;
pub mod errors;
pub mod phases;
pub mod state_machine;

pub use discovered::DiscoveredSet;
pub use errors::SessionError;
pub use phases::{Ended, Idle, Paused, PhaseRules, Running, SessionPhase};
pub use state_machine::{DEFAULT_TOTAL_SECS, Discovery, Session, TickOutcome};
