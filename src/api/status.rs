use std::sync::Arc;

use axum::{Extension, response::Json};

use crate::{collector::JobStatus, types::AppState};

/// Reports the collection job's current state.
///
/// The callback responds before the run finishes, so this endpoint is the
/// way to observe whether the run is still going, completed, or failed.
pub async fn status(Extension(state): Extension<Arc<AppState>>) -> Json<JobStatus> {
    Json(state.jobs.status().await)
}
