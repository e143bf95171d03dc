//! Layered configuration for the story workflow.

use config::{Config, Environment, File, FileFormat};
use cuentos_client::ServiceConfig;
use cuentos_core::{AudioRef, CandidateFilter};
use cuentos_error::{ConfigError, CuentosError, CuentosResult};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_SUMMARY_DELAY_MS: u64 = 5000;

/// Pacing and presentation settings for one workflow run.
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
#[serde(default)]
pub struct WorkflowConfig {
    /// How long the summary stays visible before villains are requested
    summary_delay_ms: u64,
    /// Audio source bound to the story surface
    #[builder(setter(into))]
    audio_track: AudioRef,
    /// Drop blank lines from candidate lists
    drop_blank_candidates: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            summary_delay_ms: DEFAULT_SUMMARY_DELAY_MS,
            audio_track: AudioRef::default(),
            drop_blank_candidates: false,
        }
    }
}

impl WorkflowConfig {
    /// Builder seeded with the defaults.
    pub fn builder() -> WorkflowConfigBuilder {
        WorkflowConfigBuilder::default()
    }

    /// Summary display time as a duration.
    pub fn summary_delay(&self) -> Duration {
        Duration::from_millis(self.summary_delay_ms)
    }

    /// Filter applied when parsing candidate lists.
    pub fn candidate_filter(&self) -> CandidateFilter {
        if self.drop_blank_candidates {
            CandidateFilter::DropBlank
        } else {
            CandidateFilter::KeepAll
        }
    }

    /// Replace the summary delay.
    pub fn with_summary_delay_ms(mut self, millis: u64) -> Self {
        self.summary_delay_ms = millis;
        self
    }
}

/// Complete cuentos configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CuentosConfig {
    /// Generation service connection
    #[serde(default)]
    service: ServiceConfig,
    /// Workflow pacing and presentation
    #[serde(default)]
    workflow: WorkflowConfig,
}

impl CuentosConfig {
    /// Assemble a configuration from its parts.
    pub fn new(service: ServiceConfig, workflow: WorkflowConfig) -> Self {
        Self { service, workflow }
    }

    /// Split into service and workflow settings.
    pub fn into_parts(self) -> (ServiceConfig, WorkflowConfig) {
        (self.service, self.workflow)
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> CuentosResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                CuentosError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                CuentosError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence, later sources overriding earlier:
    ///
    /// 1. Bundled defaults (cuentos.toml shipped with the binary)
    /// 2. `~/.config/cuentos/cuentos.toml`
    /// 3. `./cuentos.toml`
    /// 4. `CUENTOS__SECTION__KEY` environment variables
    ///
    /// Missing files are skipped.
    ///
    /// ```no_run
    /// use cuentos_workflow::CuentosConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = CuentosConfig::load()?;
    /// println!("{}", config.service().base_url());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> CuentosResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../cuentos.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("cuentos/cuentos.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("cuentos").required(false))
            .add_source(
                Environment::with_prefix("CUENTOS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder
            .build()
            .map_err(|e| {
                CuentosError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                CuentosError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the workflow cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service.validate()?;
        if self.workflow.audio_track.as_str().trim().is_empty() {
            return Err(ConfigError::new("workflow.audio_track must not be empty"));
        }
        Ok(())
    }

    /// Replace the service base URL.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.service = self.service.clone().with_base_url(base_url);
    }

    /// Replace the summary delay.
    pub fn set_summary_delay_ms(&mut self, millis: u64) {
        self.workflow.summary_delay_ms = millis;
    }
}
