//! Transport failures talking to the generation service.

/// Ways a request/response exchange can fail before a usable reply exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TransportErrorKind {
    /// Request could not be built or sent
    #[display("Request failed: {}", _0)]
    Send(String),
    /// Response body could not be read
    #[display("Failed to read response body: {}", _0)]
    Body(String),
    /// Response body was not valid JSON
    #[display("Response is not valid JSON: {}", _0)]
    Decode(String),
    /// JSON carried neither the success field nor `error`
    #[display("Reply from '{}' has neither '{}' nor 'error'", endpoint, field)]
    MalformedReply {
        /// Endpoint path that answered
        endpoint: String,
        /// Success field that was expected
        field: String,
    },
    /// HTTP client could not be constructed
    #[display("Failed to create HTTP client: {}", _0)]
    ClientCreation(String),
}

/// Transport error with source location tracking.
///
/// # Examples
///
/// ```
/// use cuentos_error::{TransportError, TransportErrorKind};
///
/// let err = TransportError::new(TransportErrorKind::Decode("expected value".into()));
/// assert!(format!("{}", err).contains("not valid JSON"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The kind of error that occurred
    pub kind: TransportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
