//! Business errors reported by the generation service.

/// The service parsed the request but answered with an `error` field.
///
/// # Examples
///
/// ```
/// use cuentos_error::GenerationError;
///
/// let err = GenerationError::new("/heroes", "Resumen o villano no proporcionados");
/// assert_eq!(err.endpoint, "/heroes");
/// assert!(format!("{}", err).contains("no proporcionados"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error from {}: {} at line {} in {}", endpoint, message, line, file)]
pub struct GenerationError {
    /// Endpoint that reported the error
    pub endpoint: String,
    /// Message carried in the `error` field, verbatim
    pub message: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            endpoint: endpoint.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
