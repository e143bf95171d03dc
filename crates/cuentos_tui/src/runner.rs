//! TUI runner - main loop and channel integration.

use crate::{App, Event, EventHandler, UiUpdate};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use cuentos_error::{TuiError, TuiErrorKind, TuiResult};
use cuentos_workflow::UserAction;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Run the TUI until the user quits.
///
/// Blocks the calling thread; run it on a blocking task. Updates are drained
/// from `updates` between frames, and picks are sent on `actions`.
///
/// # Arguments
///
/// * `updates` - Changes produced by the stage controller
/// * `actions` - Where picks are delivered
pub fn run_tui(
    mut updates: mpsc::UnboundedReceiver<UiUpdate>,
    actions: mpsc::UnboundedSender<UserAction>,
) -> TuiResult<()> {
    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, &mut updates, &actions);
    let restored = restore_terminal(&mut terminal);
    outcome.and(restored)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    updates: &mut mpsc::UnboundedReceiver<UiUpdate>,
    actions: &mpsc::UnboundedSender<UserAction>,
) -> TuiResult<()> {
    let mut app = App::new();
    let events = EventHandler::new(100);

    while !app.should_quit {
        while let Ok(update) = updates.try_recv() {
            app.apply(update);
        }

        terminal
            .draw(|f| crate::ui::draw(f, &app))
            .map_err(|e| TuiError::new(TuiErrorKind::Rendering(format!("Failed to draw: {}", e))))?;

        match events.next()? {
            Some(Event::Key(key)) => {
                if let Some(action) = app.handle_key(key) {
                    debug!(?action, "Sending pick");
                    if actions.send(action).is_err() {
                        warn!("Workflow has stopped; pick not delivered");
                    }
                }
            }
            Some(Event::Tick) | None => {}
        }
    }

    info!("User quit");
    Ok(())
}

fn setup_terminal() -> TuiResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to enable raw mode: {}",
            e
        )))
    })?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to setup terminal: {}",
            e
        )))
    })?;

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to create terminal: {}",
            e
        )))
    })
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> TuiResult<()> {
    disable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to disable raw mode: {}",
            e
        )))
    })?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to cleanup terminal: {}",
            e
        )))
    })?;
    terminal.show_cursor().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to show cursor: {}",
            e
        )))
    })
}
