//! Accumulated state for one workflow run.
//!
//! The session is a plain value owned by the stage controller. Every text
//! field is set at most once; the stage only moves forward. Mutators enforce
//! both rules and return a [`ProtocolError`] instead of overwriting.

use crate::{Stage, StageFailure, StoryRequest};
use cuentos_error::{ProtocolError, ProtocolErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Session state for one run, from page load to reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    stage: Stage,
    summary: Option<String>,
    selected_villain: Option<String>,
    selected_hero: Option<String>,
    story: Option<String>,
    last_error: Option<StageFailure>,
    failed_at: Option<Stage>,
    history: Vec<Stage>,
}

/// Borrowed inputs for the story request; exists only when all three are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryInputs<'a> {
    /// Summary text
    pub summary: &'a str,
    /// Chosen villain
    pub villain: &'a str,
    /// Chosen hero
    pub hero: &'a str,
}

impl StoryInputs<'_> {
    /// Wire body for `/historia`.
    pub fn to_request(&self) -> StoryRequest {
        StoryRequest {
            resumen: self.summary.to_string(),
            villano: self.villain.to_string(),
            heroe: self.hero.to_string(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session in `Idle`.
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            summary: None,
            selected_villain: None,
            selected_hero: None,
            story: None,
            last_error: None,
            failed_at: None,
            history: vec![Stage::Idle],
        }
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Summary, once received.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Chosen villain, once picked.
    pub fn selected_villain(&self) -> Option<&str> {
        self.selected_villain.as_deref()
    }

    /// Chosen hero, once picked.
    pub fn selected_hero(&self) -> Option<&str> {
        self.selected_hero.as_deref()
    }

    /// Final story, once received.
    pub fn story(&self) -> Option<&str> {
        self.story.as_deref()
    }

    /// Error recorded when the run failed.
    pub fn last_error(&self) -> Option<&StageFailure> {
        self.last_error.as_ref()
    }

    /// Stage the run was in when it failed.
    pub fn failed_at(&self) -> Option<Stage> {
        self.failed_at
    }

    /// Every stage observed so far, in order.
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    /// Stage that governs which fields must be present: the current stage,
    /// or the stage the run failed in.
    pub fn progress(&self) -> Stage {
        self.failed_at.unwrap_or(self.stage)
    }

    /// Fail with a [`ProtocolErrorKind::StageMismatch`] unless the session is
    /// in `expected`.
    #[track_caller]
    pub fn require(&self, expected: Stage, operation: &str) -> Result<(), ProtocolError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(ProtocolError::new(ProtocolErrorKind::StageMismatch {
                operation: operation.to_string(),
                expected: expected.to_string(),
                actual: self.stage.to_string(),
            }))
        }
    }

    /// Move to `to` along the forward-only ordering.
    ///
    /// Use [`Session::fail`] to enter `Failed`.
    #[track_caller]
    pub fn advance(&mut self, to: Stage) -> Result<(), ProtocolError> {
        if to == Stage::Failed || !self.stage.can_transition_to(to) {
            return Err(ProtocolError::new(ProtocolErrorKind::IllegalTransition {
                from: self.stage.to_string(),
                to: to.to_string(),
            }));
        }
        info!(from = %self.stage, to = %to, "Stage transition");
        self.stage = to;
        self.history.push(to);
        Ok(())
    }

    /// Record `failure` and enter `Failed`. Fields already set stay set.
    #[track_caller]
    pub fn fail(&mut self, failure: StageFailure) -> Result<(), ProtocolError> {
        if !self.stage.can_transition_to(Stage::Failed) {
            return Err(ProtocolError::new(ProtocolErrorKind::IllegalTransition {
                from: self.stage.to_string(),
                to: Stage::Failed.to_string(),
            }));
        }
        info!(
            from = %self.stage,
            origin = %failure.origin(),
            message = %failure.message(),
            "Workflow failed"
        );
        self.failed_at = Some(self.stage);
        self.stage = Stage::Failed;
        self.last_error = Some(failure);
        self.history.push(Stage::Failed);
        Ok(())
    }

    /// Store the summary.
    #[track_caller]
    pub fn record_summary(&mut self, summary: impl Into<String>) -> Result<(), ProtocolError> {
        set_once(&mut self.summary, "summary", summary.into())
    }

    /// Store the chosen villain.
    #[track_caller]
    pub fn record_villain(&mut self, villain: impl Into<String>) -> Result<(), ProtocolError> {
        set_once(&mut self.selected_villain, "selected_villain", villain.into())
    }

    /// Store the chosen hero.
    #[track_caller]
    pub fn record_hero(&mut self, hero: impl Into<String>) -> Result<(), ProtocolError> {
        set_once(&mut self.selected_hero, "selected_hero", hero.into())
    }

    /// Store the final story.
    #[track_caller]
    pub fn record_story(&mut self, story: impl Into<String>) -> Result<(), ProtocolError> {
        set_once(&mut self.story, "story", story.into())
    }

    /// Summary, or a [`ProtocolErrorKind::MissingSelection`] when absent.
    #[track_caller]
    pub fn require_summary(&self) -> Result<&str, ProtocolError> {
        self.summary.as_deref().ok_or_else(|| missing("summary"))
    }

    /// Chosen villain, or a [`ProtocolErrorKind::MissingSelection`] when absent.
    #[track_caller]
    pub fn require_villain(&self) -> Result<&str, ProtocolError> {
        self.selected_villain
            .as_deref()
            .ok_or_else(|| missing("selected_villain"))
    }

    /// All three story inputs, or the first one that is missing.
    #[track_caller]
    pub fn story_inputs(&self) -> Result<StoryInputs<'_>, ProtocolError> {
        Ok(StoryInputs {
            summary: self.require_summary()?,
            villain: self.require_villain()?,
            hero: self
                .selected_hero
                .as_deref()
                .ok_or_else(|| missing("selected_hero"))?,
        })
    }
}

#[track_caller]
fn set_once(slot: &mut Option<String>, field: &str, value: String) -> Result<(), ProtocolError> {
    if slot.is_some() {
        return Err(ProtocolError::new(ProtocolErrorKind::AlreadySet(field.to_string())));
    }
    debug!(field, len = value.len(), "Recording session field");
    *slot = Some(value);
    Ok(())
}

#[track_caller]
fn missing(field: &str) -> ProtocolError {
    ProtocolError::new(ProtocolErrorKind::MissingSelection(field.to_string()))
}
