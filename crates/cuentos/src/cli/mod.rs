//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the cuentos binary.

mod commands;
mod run;
mod scrape;

pub use commands::{Cli, Commands};
pub use run::{RunOptions, run_story};
pub use scrape::scrape_page;
