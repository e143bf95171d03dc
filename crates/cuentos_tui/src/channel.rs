//! Presenter and modal halves that forward to the UI thread.

use cuentos_core::{AudioRef, CandidateKind, CandidateList};
use cuentos_workflow::{Presenter, StoryModal};
use tokio::sync::mpsc;
use tracing::debug;

/// A change for the UI to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// Replace the status line
    Status(String),
    /// Replace the candidate list
    Candidates(CandidateList),
    /// A pick was accepted
    Selected {
        /// Stage the pick belonged to
        kind: CandidateKind,
        /// Chosen text
        candidate: String,
    },
    /// Show the story surface
    Story {
        /// Story text
        text: String,
        /// Audio bound to the surface
        audio: AudioRef,
    },
    /// Hide the story surface
    Dismiss,
}

/// [`Presenter`] that forwards to the UI over a channel.
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    tx: mpsc::UnboundedSender<UiUpdate>,
}

/// [`StoryModal`] that forwards to the UI over a channel.
#[derive(Debug, Clone)]
pub struct ChannelModal {
    tx: mpsc::UnboundedSender<UiUpdate>,
}

/// Presenter, modal and the receiving end the UI drains.
pub fn ui_channel() -> (ChannelPresenter, ChannelModal, mpsc::UnboundedReceiver<UiUpdate>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        ChannelPresenter { tx: tx.clone() },
        ChannelModal { tx },
        rx,
    )
}

fn forward(tx: &mpsc::UnboundedSender<UiUpdate>, update: UiUpdate) {
    // The UI closing first is a normal way for a run to end.
    if tx.send(update).is_err() {
        debug!("UI has gone away; dropping update");
    }
}

impl Presenter for ChannelPresenter {
    fn show_status(&mut self, text: &str) {
        forward(&self.tx, UiUpdate::Status(text.to_string()));
    }

    fn render_candidates(&mut self, list: &CandidateList) {
        forward(&self.tx, UiUpdate::Candidates(list.clone()));
    }

    fn announce_selection(&mut self, kind: CandidateKind, candidate: &str) {
        forward(
            &self.tx,
            UiUpdate::Selected {
                kind,
                candidate: candidate.to_string(),
            },
        );
    }
}

impl StoryModal for ChannelModal {
    fn present(&mut self, story: &str, audio: &AudioRef) {
        forward(
            &self.tx,
            UiUpdate::Story {
                text: story.to_string(),
                audio: audio.clone(),
            },
        );
    }

    fn dismiss(&mut self) {
        forward(&self.tx, UiUpdate::Dismiss);
    }
}
