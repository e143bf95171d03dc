//! Workflow stages and the forward-only transition rule.

use serde::{Deserialize, Serialize};

/// A named point in the workflow.
///
/// Stages advance one step at a time along [`Stage::ORDER`]. Any non-terminal
/// stage may also drop to [`Stage::Failed`]. Neither `StoryReady` nor `Failed`
/// has an outgoing transition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum Stage {
    /// Nothing requested yet
    Idle,
    /// Summary request in flight
    AwaitingSummary,
    /// Villain list request in flight
    AwaitingVillains,
    /// Villain list rendered, waiting for a pick
    VillainSelectionPending,
    /// Hero list request in flight
    AwaitingHeroes,
    /// Hero list rendered, waiting for a pick
    HeroSelectionPending,
    /// Story request in flight
    AwaitingStory,
    /// Story received and presented
    StoryReady,
    /// A request failed; the run is over
    Failed,
}

impl Stage {
    /// The successful path, in order.
    pub const ORDER: [Stage; 8] = [
        Stage::Idle,
        Stage::AwaitingSummary,
        Stage::AwaitingVillains,
        Stage::VillainSelectionPending,
        Stage::AwaitingHeroes,
        Stage::HeroSelectionPending,
        Stage::AwaitingStory,
        Stage::StoryReady,
    ];

    /// Position along [`Stage::ORDER`]; `None` for `Failed`.
    pub fn ordinal(self) -> Option<usize> {
        Self::ORDER.iter().position(|s| *s == self)
    }

    /// The stage that follows on the successful path.
    pub fn next(self) -> Option<Stage> {
        self.ordinal().and_then(|i| Self::ORDER.get(i + 1).copied())
    }

    /// True for `StoryReady` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::StoryReady | Stage::Failed)
    }

    /// True while a network request is outstanding.
    pub fn is_awaiting(self) -> bool {
        matches!(
            self,
            Stage::AwaitingSummary
                | Stage::AwaitingVillains
                | Stage::AwaitingHeroes
                | Stage::AwaitingStory
        )
    }

    /// Whether `self -> to` is a legal move.
    pub fn can_transition_to(self, to: Stage) -> bool {
        if self.is_terminal() {
            return false;
        }
        to == Stage::Failed || self.next() == Some(to)
    }

    /// Whether this stage is `other` or later on the successful path.
    ///
    /// `Failed` has no position and never reaches anything.
    pub fn has_reached(self, other: Stage) -> bool {
        match (self.ordinal(), other.ordinal()) {
            (Some(a), Some(b)) => a >= b,
            _ => false,
        }
    }
}
