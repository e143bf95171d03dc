//! Interactive story command handler.

use cuentos::{
    CuentosConfig, CuentosResult, HttpStoryClient, Stage, StageController, console, run_plain,
};
use std::path::PathBuf;
use tracing::{error, info, instrument};

/// Options for one interactive run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Service URL override
    pub base_url: Option<String>,
    /// Summary delay override
    pub summary_delay_ms: Option<u64>,
    /// Line-oriented prompts instead of the terminal UI
    pub plain: bool,
}

/// Load configuration and apply command-line overrides on top.
pub fn load_config(
    path: Option<&std::path::Path>,
    base_url: Option<&str>,
    summary_delay_ms: Option<u64>,
) -> CuentosResult<CuentosConfig> {
    let mut config = match path {
        Some(path) => CuentosConfig::from_file(path)?,
        None => CuentosConfig::load()?,
    };
    if let Some(url) = base_url {
        config.set_base_url(url);
    }
    if let Some(millis) = summary_delay_ms {
        config.set_summary_delay_ms(millis);
    }
    config.validate()?;
    Ok(config)
}

/// Generate a story interactively.
#[instrument(skip(options), fields(plain = options.plain))]
pub async fn run_story(options: RunOptions) -> CuentosResult<()> {
    let config = load_config(
        options.config.as_deref(),
        options.base_url.as_deref(),
        options.summary_delay_ms,
    )?;
    let (service, workflow) = config.into_parts();
    info!(base_url = %service.base_url(), "Starting story workflow");
    let client = HttpStoryClient::new(service)?;

    if options.plain || !cfg!(feature = "tui") {
        let (presenter, modal) = console(std::io::stdout());
        let mut controller = StageController::new(client, presenter, modal, workflow);
        let input = tokio::io::BufReader::new(tokio::io::stdin());
        let stage = run_plain(&mut controller, input).await?;
        report(stage);
        return Ok(());
    }

    #[cfg(feature = "tui")]
    run_with_tui(client, workflow).await?;

    Ok(())
}

#[cfg(feature = "tui")]
async fn run_with_tui(client: HttpStoryClient, workflow: cuentos::WorkflowConfig) -> CuentosResult<()> {
    use cuentos::{run_tui, ui_channel};
    use tokio::sync::mpsc;

    let (presenter, modal, updates) = ui_channel();
    let (actions_tx, actions_rx) = mpsc::unbounded_channel();
    let mut controller = StageController::new(client, presenter, modal, workflow);

    let workflow_task = tokio::spawn(async move { controller.drive(actions_rx).await });
    let ui_result = tokio::task::spawn_blocking(move || run_tui(updates, actions_tx)).await;

    if let Some(stage) = settle_workflow(workflow_task, WORKFLOW_GRACE).await {
        report(stage);
    }

    match ui_result {
        Ok(result) => result?,
        Err(e) => error!(error = %e, "Terminal UI task failed"),
    }
    Ok(())
}

/// How long the workflow may keep running once the terminal UI has exited.
#[cfg(feature = "tui")]
const WORKFLOW_GRACE: std::time::Duration = std::time::Duration::from_millis(500);

/// Wait up to `grace` for the workflow to finish, then abandon it.
#[cfg(feature = "tui")]
async fn settle_workflow(
    mut task: tokio::task::JoinHandle<CuentosResult<Stage>>,
    grace: std::time::Duration,
) -> Option<Stage> {
    match tokio::time::timeout(grace, &mut task).await {
        Ok(Ok(Ok(stage))) => Some(stage),
        Ok(Ok(Err(e))) => {
            error!(error = %e, "Workflow stopped on an internal error");
            None
        }
        Ok(Err(e)) => {
            error!(error = %e, "Workflow task failed");
            None
        }
        Err(_) => {
            info!("Abandoning workflow still in progress");
            task.abort();
            None
        }
    }
}

fn report(stage: Stage) {
    match stage {
        Stage::StoryReady => info!("Story delivered"),
        Stage::Failed => info!("Workflow ended with an error"),
        other => info!(stage = %other, "Workflow left unfinished"),
    }
}
