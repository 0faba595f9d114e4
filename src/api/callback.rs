use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};

use crate::{collector, types::AppState, warning};

/// Handles the OAuth authorization redirect.
///
/// Verifies the CSRF `state` parameter issued by the login redirect, then
/// starts a collection run with the received authorization code. The HTTP
/// response is sent immediately; the run proceeds in a spawned task and its
/// outcome is observable on `/status`.
///
/// A redirect without a `code` means the user denied access; no run is
/// started. A redirect arriving while a run is already in progress is
/// rejected, so a duplicate callback cannot trigger a second concurrent run.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AppState>>,
) -> Html<&'static str> {
    let expected_state = state.login_state.lock().await.take();
    if expected_state.is_none() || params.get("state") != expected_state.as_ref() {
        warning!("Callback rejected: state parameter missing or mismatched.");
        return Html("<h4>Invalid state parameter. Please restart the login flow.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Access denied. You may close this window.</h4>");
    };

    if !state.jobs.try_start().await {
        warning!("Callback rejected: a collection run is already in progress.");
        return Html("<h4>A collection run is already in progress.</h4>");
    }

    let code = code.clone();
    let run_state = Arc::clone(&state);
    tokio::spawn(async move {
        collector::run(run_state, code).await;
    });

    Html("<h2>Authentication successful.</h2><p>Collection started; you may close this window.</p>")
}
