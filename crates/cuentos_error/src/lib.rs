//! Error types for the cuentos story workflow.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! The three workflow failure classes map onto:
//! - [`TransportError`] - the request could not be sent or the reply could not be read
//! - [`GenerationError`] - the service answered with an `error` field
//! - [`ProtocolError`] - a stage handler was called out of order
//!
//! # Examples
//!
//! ```
//! use cuentos_error::{CuentosResult, TransportError, TransportErrorKind};
//!
//! fn fetch_summary() -> CuentosResult<String> {
//!     Err(TransportError::new(TransportErrorKind::Send("connection refused".into())))?
//! }
//!
//! assert!(fetch_summary().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod protocol;
mod transport;
#[cfg(feature = "tui")]
mod tui;

pub use config::ConfigError;
pub use error::{CuentosError, CuentosErrorKind, CuentosResult};
pub use generation::GenerationError;
pub use protocol::{ProtocolError, ProtocolErrorKind};
pub use transport::{TransportError, TransportErrorKind};
#[cfg(feature = "tui")]
pub use tui::{TuiError, TuiErrorKind, TuiResult};
