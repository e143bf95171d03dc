//! Audio source references.

use serde::{Deserialize, Serialize};

/// Track bound to the story surface when nothing else is configured.
pub const DEFAULT_AUDIO_TRACK: &str = "output (3).wav";

/// A replaceable audio source reference (a path or URL).
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct AudioRef(String);

impl AudioRef {
    /// Wrap a source reference.
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    /// The raw reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AudioRef {
    fn from(source: &str) -> Self {
        Self(source.to_string())
    }
}

impl Default for AudioRef {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIO_TRACK)
    }
}
