//! Network client for the story generation service.
//!
//! The service exposes one JSON POST endpoint per workflow stage. Each call
//! here performs exactly one request/response exchange and keeps no state
//! between calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use cuentos_client::{HttpStoryClient, ServiceConfig, StoryService};
//! use cuentos_core::{StageReply, SummaryRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpStoryClient::new(ServiceConfig::default())?;
//! match client.summary(&SummaryRequest {}).await? {
//!     StageReply::Success(summary) => println!("{summary}"),
//!     StageReply::BusinessError(message) => eprintln!("{message}"),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod http;
mod service;

pub use config::{DEFAULT_BASE_URL, ServiceConfig, ServiceConfigBuilder};
pub use http::HttpStoryClient;
pub use service::{ServiceReply, StoryService};
