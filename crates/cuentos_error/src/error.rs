//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, ProtocolError, TransportError};
#[cfg(feature = "tui")]
use crate::TuiError;

/// Every failure the workflow can produce.
///
/// # Examples
///
/// ```
/// use cuentos_error::{CuentosError, CuentosErrorKind, GenerationError};
///
/// let err: CuentosError = GenerationError::new("/villanos", "Resumen no proporcionado").into();
/// assert!(matches!(err.kind(), CuentosErrorKind::Generation(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CuentosErrorKind {
    /// Request could not be sent or reply could not be read
    #[from(TransportError)]
    Transport(TransportError),
    /// Service answered with an `error` field
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Stage handler invoked out of order
    #[from(ProtocolError)]
    Protocol(ProtocolError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// TUI error
    #[cfg(feature = "tui")]
    #[from(TuiError)]
    Tui(TuiError),
}

/// Cuentos error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Cuentos Error: {}", _0)]
pub struct CuentosError(Box<CuentosErrorKind>);

impl CuentosError {
    /// Create a new error from a kind.
    pub fn new(kind: CuentosErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CuentosErrorKind {
        &self.0
    }

    /// True when the error is an out-of-order handler call.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self.kind(), CuentosErrorKind::Protocol(_))
    }
}

// Generic From implementation for any type that converts to CuentosErrorKind
impl<T> From<T> for CuentosError
where
    T: Into<CuentosErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for cuentos operations.
pub type CuentosResult<T> = std::result::Result<T, CuentosError>;
