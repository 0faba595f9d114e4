use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::json;
use splaycli::{
    collector::{CollectionOutcome, HistorySource, JobRegistry, RunReport, collect},
    error::CollectError,
    types::{Cursors, FetchConfig, PlayHistoryItem, RecentlyPlayedResponse},
};

/// Serves a scripted sequence of pages and counts how often it is called.
struct MockSource {
    pages: Mutex<VecDeque<Result<RecentlyPlayedResponse, CollectError>>>,
    calls: AtomicUsize,
}

impl MockSource {
    fn new(pages: Vec<Result<RecentlyPlayedResponse, CollectError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistorySource for MockSource {
    async fn recently_played(
        &self,
        _before: i64,
        _limit: u32,
    ) -> Result<RecentlyPlayedResponse, CollectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .expect("collector requested more pages than scripted")
    }
}

fn play(track_name: &str, played_at: &str) -> PlayHistoryItem {
    PlayHistoryItem {
        track: json!({ "name": track_name, "artists": [{ "name": "Artist" }] }),
        played_at: played_at.to_string(),
        context: None,
    }
}

fn page(items: Vec<PlayHistoryItem>, before: Option<&str>) -> RecentlyPlayedResponse {
    RecentlyPlayedResponse {
        items,
        cursors: before.map(|b| Cursors {
            after: None,
            before: Some(b.to_string()),
        }),
        next: None,
        total: None,
        limit: None,
        href: None,
    }
}

fn fetch_config(lower_bound_ms: Option<i64>, start_ms: i64) -> FetchConfig {
    FetchConfig {
        lower_bound: lower_bound_ms.map(|ms| DateTime::from_timestamp_millis(ms).unwrap()),
        page_limit: 10,
        upper_bound_override: Some(start_ms),
    }
}

#[tokio::test]
async fn empty_history_is_a_successful_exhausted_run() {
    let source = MockSource::new(vec![Ok(page(vec![], None))]);
    let fetch = fetch_config(Some(0), 1_000);

    let collection = collect(&source, &fetch).await.unwrap();

    assert_eq!(collection.outcome, CollectionOutcome::Exhausted);
    assert!(collection.items.is_empty());
    assert_eq!(collection.pages, 1);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn stops_when_provider_stops_returning_a_cursor() {
    let source = MockSource::new(vec![
        Ok(page(vec![play("a1", "t1"), play("a2", "t2")], Some("900"))),
        Ok(page(vec![play("b1", "t3"), play("b2", "t4")], Some("800"))),
        Ok(page(vec![play("c1", "t5"), play("c2", "t6")], Some("700"))),
        Ok(page(vec![play("dropped", "t7")], None)),
    ]);
    let fetch = fetch_config(Some(0), 1_000);

    let collection = collect(&source, &fetch).await.unwrap();

    assert_eq!(collection.outcome, CollectionOutcome::Exhausted);
    // Items from the cursor-bearing pages, in provider order; the final
    // cursorless page contributes nothing.
    let names: Vec<&str> = collection
        .items
        .iter()
        .map(|i| i.track["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a1", "a2", "b1", "b2", "c1", "c2"]);
    assert_eq!(source.calls(), 4);
}

#[tokio::test]
async fn stops_once_the_cursor_crosses_the_lower_bound() {
    let source = MockSource::new(vec![
        Ok(page(vec![play("a", "t1")], Some("400"))),
        Ok(page(vec![play("b", "t2")], Some("300"))),
        Ok(page(vec![play("c", "t3")], Some("200"))),
    ]);
    let fetch = fetch_config(Some(250), 500);

    let collection = collect(&source, &fetch).await.unwrap();

    assert_eq!(collection.outcome, CollectionOutcome::BoundReached);
    let names: Vec<&str> = collection
        .items
        .iter()
        .map(|i| i.track["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn no_lower_bound_means_no_fetches() {
    let source = MockSource::new(vec![]);
    let fetch = fetch_config(None, 1_000);

    let collection = collect(&source, &fetch).await.unwrap();

    assert_eq!(collection.outcome, CollectionOutcome::Skipped);
    assert!(collection.items.is_empty());
    assert_eq!(collection.pages, 0);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn api_error_aborts_the_loop() {
    let source = MockSource::new(vec![
        Ok(page(vec![play("a", "t1")], Some("400"))),
        Err(CollectError::Api {
            status: 500,
            body: "server error".to_string(),
        }),
    ]);
    let fetch = fetch_config(Some(0), 500);

    let result = collect(&source, &fetch).await;

    assert!(matches!(result, Err(CollectError::Api { status: 500, .. })));
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn unparseable_cursor_ends_as_exhausted_but_keeps_the_page() {
    let source = MockSource::new(vec![Ok(page(
        vec![play("a", "t1")],
        Some("not-a-timestamp"),
    ))]);
    let fetch = fetch_config(Some(0), 500);

    let collection = collect(&source, &fetch).await.unwrap();

    assert_eq!(collection.outcome, CollectionOutcome::Exhausted);
    // Unlike a missing cursor, a garbled cursor value still delivered a
    // page; its items stay in the result.
    let names: Vec<&str> = collection
        .items
        .iter()
        .map(|i| i.track["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a"]);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn duplicate_runs_are_rejected_while_one_is_active() {
    let jobs = JobRegistry::new();

    assert!(jobs.try_start().await);
    // Second callback while the run is active must not start another one.
    assert!(!jobs.try_start().await);

    jobs.complete(RunReport {
        items: 0,
        pages: 0,
        outcome: CollectionOutcome::Exhausted,
        artifact: None,
    })
    .await;

    // After the run finished a new one may start.
    assert!(jobs.try_start().await);
}
