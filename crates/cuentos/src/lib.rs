//! Cuentos - interactive story generation
//!
//! Cuentos walks a reader through four generation steps against a story
//! service: a summary, a list of villains to choose from, a list of heroes to
//! choose from, and finally the story itself, shown with an audio track.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cuentos::{HttpStoryClient, ServiceConfig, StageController, WorkflowConfig, console};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpStoryClient::new(ServiceConfig::default())?;
//!     let (presenter, modal) = console(std::io::stdout());
//!     let mut controller = StageController::new(client, presenter, modal, WorkflowConfig::default());
//!
//!     let stage = controller.start().await?;
//!     println!("waiting in {stage}");
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `tui` (default) - terminal user interface
//! - `observability` - OpenTelemetry span export to stdout
//!
//! # Architecture
//!
//! - `cuentos_error` - Error types
//! - `cuentos_core` - Stages, session, candidates and wire types
//! - `cuentos_client` - Story service trait and HTTP client
//! - `cuentos_workflow` - Stage controller, presentation contracts, configuration
//! - `cuentos_tui` - Terminal UI
//!
//! This crate (`cuentos`) re-exports everything for convenience.

pub use cuentos_client::*;
pub use cuentos_core::*;
pub use cuentos_error::*;
pub use cuentos_workflow::*;

#[cfg(feature = "tui")]
pub use cuentos_tui::*;

mod console;
pub use console::{ConsoleModal, ConsolePresenter, console, run_plain};

#[cfg(feature = "observability")]
pub mod observability;
