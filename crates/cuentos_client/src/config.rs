//! Connection settings for the generation service.

use cuentos_error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the generation service listens by default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Generation service connection settings.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_builder::Builder,
)]
#[builder(default)]
pub struct ServiceConfig {
    /// Service root, e.g. `http://127.0.0.1:5000`
    #[builder(setter(into))]
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Per-request timeout in seconds; no timeout when absent
    #[builder(setter(strip_option))]
    #[serde(default)]
    timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    /// Settings pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Replace the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::new("service.base_url must not be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::new(format!(
                "service.base_url must start with http:// or https://, got '{}'",
                url
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::new("service.timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}
