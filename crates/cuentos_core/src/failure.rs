//! Recorded stage failures.

use cuentos_error::GenerationError;
use serde::{Deserialize, Serialize};

/// Where a failure came from. Both are shown the same way to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum FailureOrigin {
    /// Request not sent or reply unreadable
    Transport,
    /// Service answered with an `error` field
    Business,
}

/// The error recorded in a failed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageFailure {
    origin: FailureOrigin,
    message: String,
}

impl StageFailure {
    /// Failure from a business error; the service message is shown verbatim.
    pub fn business(err: &GenerationError) -> Self {
        Self {
            origin: FailureOrigin::Business,
            message: err.message.clone(),
        }
    }

    /// Failure from a transport error. The low-level cause is logged, not
    /// shown; the user sees `status_text`.
    pub fn transport(status_text: impl Into<String>) -> Self {
        Self {
            origin: FailureOrigin::Transport,
            message: status_text.into(),
        }
    }

    /// Origin of the failure.
    pub fn origin(&self) -> FailureOrigin {
        self.origin
    }

    /// Text surfaced through the status region.
    pub fn message(&self) -> &str {
        &self.message
    }
}
