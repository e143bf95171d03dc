//! Ordering violations in the stage workflow.

/// Specific protocol violations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProtocolErrorKind {
    /// Handler invoked while the session is in a different stage
    #[display("'{}' requires stage {} but session is in {}", operation, expected, actual)]
    StageMismatch {
        /// Handler that was invoked
        operation: String,
        /// Stage the handler requires
        expected: String,
        /// Stage the session was actually in
        actual: String,
    },
    /// Transition not allowed by the forward-only ordering
    #[display("Illegal transition from {} to {}", from, to)]
    IllegalTransition {
        /// Current stage
        from: String,
        /// Requested stage
        to: String,
    },
    /// A set-once session field was written twice
    #[display("Session field '{}' is already set", _0)]
    AlreadySet(String),
    /// A request needed a session field that is still absent
    #[display("Session field '{}' is not set", _0)]
    MissingSelection(String),
    /// Pick does not refer to the list currently rendered
    #[display("Pick for render cycle {} does not match current cycle {}", got, current)]
    StaleCycle {
        /// Cycle stamped on the pick
        got: u64,
        /// Cycle currently rendered
        current: u64,
    },
    /// Pick index is outside the rendered list
    #[display("No candidate at index {}", _0)]
    UnknownCandidate(usize),
}

/// Protocol error with source location tracking.
///
/// # Examples
///
/// ```
/// use cuentos_error::{ProtocolError, ProtocolErrorKind};
///
/// let err = ProtocolError::new(ProtocolErrorKind::AlreadySet("summary".into()));
/// assert!(format!("{}", err).contains("already set"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Protocol Error: {} at line {} in {}", kind, line, file)]
pub struct ProtocolError {
    /// The kind of violation
    pub kind: ProtocolErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProtocolError {
    /// Create a new ProtocolError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProtocolErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
