//! Cuentos CLI binary.
//!
//! This binary provides command-line access to the story workflow:
//! - Generate a story in the terminal UI or with plain prompts
//! - Ask the service to scrape a page for the next summary

use clap::Parser;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, RunOptions, run_story, scrape_page};

    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    #[cfg(feature = "observability")]
    let mut provider = None;

    match &cli.command {
        // The terminal UI owns the screen, so logs go to a file.
        Commands::Run { log_file, .. } if cli.uses_tui() => {
            let file = std::fs::File::create(log_file)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        _ => {
            #[cfg(feature = "observability")]
            {
                use cuentos::observability::{ObservabilityConfig, init_observability_with_config};
                provider = Some(init_observability_with_config(
                    ObservabilityConfig::new("cuentos").with_log_level(log_level),
                )?);
            }
            #[cfg(not(feature = "observability"))]
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    // Execute the requested command
    let result = match cli.command {
        Commands::Run {
            plain,
            summary_delay_ms,
            ..
        } => {
            run_story(RunOptions {
                config: cli.config,
                base_url: cli.base_url,
                summary_delay_ms,
                plain,
            })
            .await
        }

        Commands::Scrape { url } => {
            scrape_page(&url, cli.config.as_deref(), cli.base_url.as_deref()).await
        }
    };

    #[cfg(feature = "observability")]
    if let Some(provider) = provider {
        cuentos::observability::shutdown_observability(provider);
    }

    result?;
    Ok(())
}
