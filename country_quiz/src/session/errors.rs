//! Session error types.

use crate::catalog::CountryId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while driving a session
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum SessionError {
    #[error("input is disabled while the quiz is {phase}")]
    InputDisabled { phase: String },
    #[error("can't {action} while the quiz is {phase}")]
    InvalidTransition { action: String, phase: String },
    #[error("country {0} is not in the catalog")]
    UnknownCountry(CountryId),
}

impl SessionError {
    pub(crate) fn transition(action: &str, phase: &str) -> Self {
        Self::InvalidTransition {
            action: action.to_string(),
            phase: phase.to_string(),
        }
    }
}
