//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cuentos - pick a villain and a hero, get a story
#[derive(Parser, Debug)]
#[command(name = "cuentos")]
#[command(about = "Interactive story generation against a story service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read configuration from this file instead of the usual locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the story service URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a story interactively
    Run {
        /// Use plain line-oriented prompts instead of the terminal UI
        #[arg(long)]
        plain: bool,

        /// How long the summary stays on screen, in milliseconds
        #[arg(long)]
        summary_delay_ms: Option<u64>,

        /// Where logs go while the terminal UI is running
        #[arg(long, default_value = "cuentos.log")]
        log_file: PathBuf,
    },

    /// Ask the service to fetch a page whose text seeds the next summary
    Scrape {
        /// Page to fetch
        url: String,
    },
}

impl Cli {
    /// True when the terminal UI will own the screen.
    pub fn uses_tui(&self) -> bool {
        cfg!(feature = "tui") && matches!(self.command, Commands::Run { plain: false, .. })
    }
}
