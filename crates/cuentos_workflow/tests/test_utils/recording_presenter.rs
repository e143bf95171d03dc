//! Presenter that records what it was asked to show.

use cuentos_core::{CandidateKind, CandidateList};
use cuentos_workflow::Presenter;

/// One presenter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    /// `show_status`
    Status(String),
    /// `render_candidates`
    Render {
        kind: CandidateKind,
        cycle: u64,
        items: Vec<String>,
    },
    /// `announce_selection`
    Announce(CandidateKind, String),
}

/// Records every presenter call in order.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    /// Status texts in the order they were shown.
    pub fn statuses(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::Status(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Rendered lists as `(kind, items)`.
    pub fn renders(&self) -> Vec<(CandidateKind, Vec<String>)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::Render { kind, items, .. } => Some((*kind, items.clone())),
                _ => None,
            })
            .collect()
    }

    /// Last status shown, if any.
    pub fn last_status(&self) -> Option<&str> {
        self.statuses().last().copied()
    }
}

impl Presenter for RecordingPresenter {
    fn show_status(&mut self, text: &str) {
        self.events.push(PresenterEvent::Status(text.to_string()));
    }

    fn render_candidates(&mut self, list: &CandidateList) {
        self.events.push(PresenterEvent::Render {
            kind: *list.kind(),
            cycle: *list.cycle(),
            items: list.texts().map(str::to_string).collect(),
        });
    }

    fn announce_selection(&mut self, kind: CandidateKind, candidate: &str) {
        self.events
            .push(PresenterEvent::Announce(kind, candidate.to_string()));
    }
}
