use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;
use tokio::sync::Mutex;

use crate::{collector::JobRegistry, config::Config};

/// Access token returned by the token endpoint.
///
/// Held in memory for the duration of one collection run. It is never
/// refreshed or persisted; the next run starts with a fresh authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
    pub expires_in: u64,
    pub refresh_token: String,
}

/// One entry of the user's play history.
///
/// `track` and `context` are kept as raw JSON so the artifact contains the
/// provider schema verbatim, without renaming or re-shaping fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistoryItem {
    pub track: Value,
    pub played_at: String,
    pub context: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentlyPlayedResponse {
    pub items: Vec<PlayHistoryItem>,
    pub cursors: Option<Cursors>,
    pub next: Option<String>,
    pub total: Option<u64>,
    pub limit: Option<u32>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
    pub before: Option<String>,
}

/// Immutable per-run fetch parameters.
///
/// Without a lower bound the pagination loop never starts: the collector only
/// fetches history between "now" and an explicit floor.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub lower_bound: Option<DateTime<Utc>>,
    pub page_limit: u32,
    /// Starting cursor override in epoch milliseconds; defaults to now.
    pub upper_bound_override: Option<i64>,
}

#[derive(Tabled)]
pub struct PlayTableRow {
    pub played_at: String,
    pub track: String,
    pub artists: String,
}

/// State shared between the CLI flow and the callback server handlers.
pub struct AppState {
    pub config: Config,
    pub fetch: FetchConfig,
    /// CSRF `state` parameter issued by the login redirect, taken by the
    /// callback when it arrives.
    pub login_state: Mutex<Option<String>>,
    pub jobs: Arc<JobRegistry>,
}

impl AppState {
    pub fn new(config: Config, fetch: FetchConfig) -> Self {
        Self {
            config,
            fetch,
            login_state: Mutex::new(None),
            jobs: Arc::new(JobRegistry::new()),
        }
    }
}
