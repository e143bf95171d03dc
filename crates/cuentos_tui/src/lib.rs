//! Terminal user interface for the story workflow.
//!
//! The stage controller runs on a tokio task and talks to the screen through
//! [`ChannelPresenter`] and [`ChannelModal`], which forward [`UiUpdate`]s over
//! an mpsc channel. [`run_tui`] owns the terminal, applies those updates to
//! [`App`], and sends picks back as
//! [`UserAction`](cuentos_workflow::UserAction)s. Built with ratatui for
//! terminal rendering.

mod app;
mod channel;
mod events;
mod runner;
mod ui;

pub use app::App;
pub use channel::{ChannelModal, ChannelPresenter, UiUpdate, ui_channel};
pub use cuentos_error::{TuiError, TuiErrorKind, TuiResult};
pub use events::{Event, EventHandler};
pub use runner::run_tui;
