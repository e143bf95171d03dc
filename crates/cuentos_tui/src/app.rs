//! Application state and key handling.

use crate::UiUpdate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cuentos_core::CandidateKind;
use cuentos_workflow::{ModalController, SelectionRegion, StatusRegion, StoryModal, UserAction};
use tracing::debug;

/// Main application state.
#[derive(Debug, Default)]
pub struct App {
    /// Shared status line
    pub status: StatusRegion,
    /// Candidate list on screen
    pub selection: SelectionRegion,
    /// Final story surface
    pub modal: ModalController,
    /// Confirmation of the last accepted pick
    pub notice: Option<String>,
    /// Whether to quit the application
    pub should_quit: bool,
}

impl App {
    /// Create a new App instance with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one update from the controller.
    pub fn apply(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::Status(text) => self.status.set(text),
            UiUpdate::Candidates(list) => {
                self.selection.render(list);
                self.notice = None;
            }
            UiUpdate::Selected { kind, candidate } => {
                self.notice = Some(match kind {
                    CandidateKind::Villain => format!("You selected: {}", candidate),
                    CandidateKind::Hero => format!("You selected the hero: {}", candidate),
                });
            }
            UiUpdate::Story { text, audio } => self.modal.present(&text, &audio),
            UiUpdate::Dismiss => self.modal.dismiss(),
        }
    }

    /// Heading above the candidate list, if one is shown.
    pub fn heading(&self) -> Option<&'static str> {
        self.selection.list().map(|l| l.kind().heading())
    }

    /// Handle a key press, returning a pick for the controller if one was made.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit();
                None
            }
            KeyCode::Char('q') => {
                self.quit();
                None
            }
            KeyCode::Esc | KeyCode::Char('x') if self.modal.is_visible() => {
                self.modal.dismiss();
                None
            }
            _ if self.modal.is_visible() => None,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selection.focus_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selection.focus_next();
                None
            }
            KeyCode::Enter => self.selection.pick_focused().map(|(action, _)| action),
            KeyCode::Char(c) => {
                let digit = c.to_digit(10).filter(|d| *d >= 1)?;
                let cycle = self.selection.cycle()?;
                let index = digit as usize - 1;
                debug!(cycle, index, "Direct pick");
                self.selection.pick(cycle, index).map(|(action, _)| action)
            }
            _ => None,
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
