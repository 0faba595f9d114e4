use std::{path::PathBuf, sync::Arc, time::Duration};

use crate::{
    collector::{JobRegistry, JobStatus},
    config::Config,
    error, info,
    server::start_api_server,
    success,
    types::{AppState, FetchConfig},
    utils, warning,
};

/// How long the command waits for the user to authorize and the collection
/// run to finish before giving up.
const MAX_WAIT: Duration = Duration::from_secs(600);

/// Runs one complete collection flow.
///
/// Starts the local callback server, opens the login URL in the browser and
/// polls the job registry until the run triggered by the OAuth callback
/// completes, fails, or the wait times out.
pub async fn run(
    until: Option<String>,
    no_bound: bool,
    limit: u32,
    before: Option<i64>,
    output_dir: Option<PathBuf>,
) {
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    let lower_bound = if no_bound {
        None
    } else {
        match until {
            Some(value) => match utils::parse_lower_bound(&value) {
                Ok(bound) => Some(bound),
                Err(e) => error!("{}", e),
            },
            None => Some(utils::default_lower_bound()),
        }
    };

    if lower_bound.is_none() {
        warning!("No lower bound configured; the run will not fetch any history.");
    }

    let fetch = FetchConfig {
        lower_bound,
        page_limit: limit,
        upper_bound_override: before,
    };

    let server_addr = config.server_addr.clone();
    let state = Arc::new(AppState::new(config, fetch));

    let server_state = Arc::clone(&state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    let login_url = format!("http://{}/login", server_addr);
    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    info!("Waiting for authorization...");
    match wait_for_outcome(&state.jobs).await {
        Some(JobStatus::Completed { report, .. }) => {
            success!(
                "Collected {} plays over {} pages ({}).",
                report.items,
                report.pages,
                report.outcome
            );
            match report.artifact {
                Some(path) => info!("Result written to {}", path),
                None => info!("Nothing collected; no artifact written."),
            }
        }
        Some(JobStatus::Failed { error, .. }) => {
            error!("Collection failed: {}", error);
        }
        _ => error!("Authorization or collection timed out."),
    }
}

/// Polls the job registry until the run reaches a terminal state.
async fn wait_for_outcome(jobs: &JobRegistry) -> Option<JobStatus> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < MAX_WAIT {
        match jobs.status().await {
            status @ (JobStatus::Completed { .. } | JobStatus::Failed { .. }) => {
                return Some(status);
            }
            _ => {}
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
