use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    collector::{ResultSink, job::RunReport},
    error::CollectError,
    spotify::{self, client::ApiClient},
    types::{AppState, FetchConfig, PlayHistoryItem, RecentlyPlayedResponse},
};

/// A provider of recently-played pages.
///
/// The collector is generic over this trait so the pagination loop can be
/// driven by the real Web API client or by scripted pages in tests.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Returns one page of plays strictly older than `before`
    /// (epoch milliseconds).
    async fn recently_played(
        &self,
        before: i64,
        limit: u32,
    ) -> Result<RecentlyPlayedResponse, CollectError>;
}

/// How a pagination loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionOutcome {
    /// The provider reported no further `before` cursor.
    Exhausted,
    /// The cursor crossed the configured lower bound.
    BoundReached,
    /// No lower bound was configured; the loop never started.
    Skipped,
}

impl std::fmt::Display for CollectionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionOutcome::Exhausted => write!(f, "provider history exhausted"),
            CollectionOutcome::BoundReached => write!(f, "lower bound reached"),
            CollectionOutcome::Skipped => write!(f, "skipped, no lower bound"),
        }
    }
}

/// The accumulated result of one pagination loop.
#[derive(Debug)]
pub struct Collection {
    /// Items in pagination order, most recent first.
    pub items: Vec<PlayHistoryItem>,
    pub pages: u32,
    pub outcome: CollectionOutcome,
}

/// Walks the recently-played history backward from "now" down to the
/// configured lower bound, accumulating items page by page.
///
/// Each iteration requests the page strictly before the current cursor and
/// then adopts the provider-returned `cursors.before` value; trusting the
/// provider cursor over item timestamps keeps the walk robust to gaps and
/// duplicates in `played_at`. A page with a missing or empty cursor ends the
/// loop as [`CollectionOutcome::Exhausted`] and its items are not appended;
/// a page whose cursor is present but unparseable also ends the loop, but
/// its items are kept.
///
/// An empty first page from a user with no history is a successful
/// `Exhausted` run, not an error. Note the loop has no iteration cap and no
/// monotonicity check on the provider cursor; a provider that repeats a
/// cursor would keep the loop running.
pub async fn collect<S: HistorySource + ?Sized>(
    source: &S,
    fetch: &FetchConfig,
) -> Result<Collection, CollectError> {
    let mut items: Vec<PlayHistoryItem> = Vec::new();

    let Some(lower_bound) = fetch.lower_bound else {
        return Ok(Collection {
            items,
            pages: 0,
            outcome: CollectionOutcome::Skipped,
        });
    };

    let bound_ms = lower_bound.timestamp_millis();
    let mut cursor = fetch
        .upper_bound_override
        .unwrap_or_else(|| Utc::now().timestamp_millis());
    let mut pages = 0u32;

    while cursor > bound_ms {
        let page = source.recently_played(cursor, fetch.page_limit).await?;
        pages += 1;

        let next = page
            .cursors
            .as_ref()
            .and_then(|c| c.before.as_deref())
            .filter(|before| !before.is_empty());
        let Some(before) = next else {
            return Ok(Collection {
                items,
                pages,
                outcome: CollectionOutcome::Exhausted,
            });
        };

        let Ok(next_cursor) = before.parse::<i64>() else {
            // An unusable cursor value still delivered a page; keep its
            // items, only the walk below them is impossible.
            items.extend(page.items);
            return Ok(Collection {
                items,
                pages,
                outcome: CollectionOutcome::Exhausted,
            });
        };

        cursor = next_cursor;
        items.extend(page.items);
    }

    Ok(Collection {
        items,
        pages,
        outcome: CollectionOutcome::BoundReached,
    })
}

/// Executes one complete collection run and reports the outcome through the
/// job registry.
///
/// Spawned by the OAuth callback handler once a code arrives. Errors abort
/// the run immediately; partial results gathered before a failed page are
/// discarded. Feedback to the user happens at the registry's consumers, not
/// here.
pub async fn run(state: Arc<AppState>, code: String) {
    match execute(&state, &code).await {
        Ok(report) => state.jobs.complete(report).await,
        Err(e) => state.jobs.fail(e.to_string()).await,
    }
}

async fn execute(state: &AppState, code: &str) -> Result<RunReport, CollectError> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Exchanging authorization code...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let token = match spotify::auth::exchange_code(&state.config, code).await {
        Ok(token) => token,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Collecting recently played tracks...");
    let client = ApiClient::new(state.config.api_url.clone(), token.access_token.clone());
    let collection = match collect(&client, &state.fetch).await {
        Ok(collection) => collection,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Writing result artifact...");
    let sink = ResultSink::new(state.config.output_dir.clone());
    let artifact = match sink.write(&collection.items).await {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();
    Ok(RunReport {
        items: collection.items.len(),
        pages: collection.pages,
        outcome: collection.outcome,
        artifact: artifact.map(|p| p.display().to_string()),
    })
}
