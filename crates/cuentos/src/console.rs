//! Line-oriented front end for terminals without the TUI.

use cuentos_client::StoryService;
use cuentos_core::{AudioRef, CandidateKind, CandidateList, Stage};
use cuentos_error::CuentosResult;
use cuentos_workflow::{ModalController, Presenter, StageController, StoryModal};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

/// Presenter that prints status lines and numbered candidates.
#[derive(Debug)]
pub struct ConsolePresenter<W> {
    out: Arc<Mutex<W>>,
}

/// Story modal that prints the story and its audio reference.
#[derive(Debug)]
pub struct ConsoleModal<W> {
    out: Arc<Mutex<W>>,
    modal: ModalController,
}

/// Presenter and modal sharing one output.
pub fn console<W: Write + Send>(out: W) -> (ConsolePresenter<W>, ConsoleModal<W>) {
    let out = Arc::new(Mutex::new(out));
    (
        ConsolePresenter { out: out.clone() },
        ConsoleModal {
            out,
            modal: ModalController::default(),
        },
    )
}

fn emit<W: Write>(out: &Mutex<W>, text: &str) {
    let Ok(mut out) = out.lock() else {
        warn!("Console output lock poisoned");
        return;
    };
    if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
        warn!(error = %e, "Failed to write to console");
    }
}

impl<W: Write> ConsolePresenter<W> {
    /// Print a line that is not part of the workflow.
    pub fn say(&self, text: &str) {
        emit(&self.out, &format!("{}\n", text));
    }

    /// Print a prompt without a trailing newline.
    pub fn prompt(&self, text: &str) {
        emit(&self.out, text);
    }
}

impl<W> ConsoleModal<W> {
    /// Underlying story surface and audio state.
    pub fn state(&self) -> &ModalController {
        &self.modal
    }
}

impl<W: Write + Send> Presenter for ConsolePresenter<W> {
    fn show_status(&mut self, text: &str) {
        // Clearing has nothing to print on a scrolling console.
        if !text.is_empty() {
            self.say(text);
        }
    }

    fn render_candidates(&mut self, list: &CandidateList) {
        let mut text = format!("\n{}\n", list.kind().heading());
        for candidate in list.items() {
            text.push_str(&format!("  {}. {}\n", candidate.index() + 1, candidate.text()));
        }
        emit(&self.out, &text);
    }

    fn announce_selection(&mut self, kind: CandidateKind, candidate: &str) {
        match kind {
            CandidateKind::Villain => self.say(&format!("You selected: {}", candidate)),
            CandidateKind::Hero => self.say(&format!("You selected the hero: {}", candidate)),
        }
    }
}

impl<W: Write + Send> StoryModal for ConsoleModal<W> {
    fn present(&mut self, story: &str, audio: &AudioRef) {
        self.modal.present(story, audio);
        emit(
            &self.out,
            &format!("\n=== Your story ===\n\n{}\n\n♪ {}\n", story, audio),
        );
    }

    fn dismiss(&mut self) {
        self.modal.dismiss();
    }
}

/// Run a whole workflow, reading picks as 1-based numbers from `input`.
///
/// Lines that are not a listed number are rejected with a hint and the prompt
/// repeats. Returns the last stage reached; end of input stops early.
pub async fn run_plain<S, R, W>(
    controller: &mut StageController<S, ConsolePresenter<W>, ConsoleModal<W>>,
    input: R,
) -> CuentosResult<Stage>
where
    S: StoryService,
    R: AsyncBufRead + Unpin,
    W: Write + Send,
{
    let mut lines = input.lines();
    let mut stage = controller.start().await?;

    while !stage.is_terminal() {
        let Some((cycle, len)) = controller.pending().map(|l| (*l.cycle(), l.len())) else {
            break;
        };
        if len == 0 {
            controller.presenter().say("There is nothing to choose from.");
            break;
        }

        controller
            .presenter()
            .prompt(&format!("Enter a number (1-{}): ", len));
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!(%stage, "Input closed before the workflow finished");
                break;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read input");
                break;
            }
        };

        match line.trim().parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => {
                stage = controller.pick(cycle, n - 1).await?;
            }
            _ => controller
                .presenter()
                .say(&format!("'{}' is not one of the options.", line.trim())),
        }
    }

    Ok(stage)
}
