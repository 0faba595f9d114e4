use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::collector::CollectionOutcome;

/// Summary of a finished collection run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub items: usize,
    pub pages: u32,
    pub outcome: CollectionOutcome,
    /// Path of the written artifact, if any items were collected.
    pub artifact: Option<String>,
}

/// Observable state of the collection job.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobStatus {
    Idle,
    Running { started_at: i64 },
    Completed { finished_at: i64, report: RunReport },
    Failed { finished_at: i64, error: String },
}

/// Tracks the one collection job of this process.
///
/// The OAuth callback does not fire-and-forget: it claims the job through
/// [`JobRegistry::try_start`] before spawning a run, and a second callback
/// arriving while a run is active is rejected. The run's completion or
/// failure is observable via [`JobRegistry::status`], served on `/status`.
pub struct JobRegistry {
    status: Mutex<JobStatus>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            status: Mutex::new(JobStatus::Idle),
        }
    }

    /// Claims the job for a new run. Returns false if a run is already in
    /// progress, in which case the caller must not spawn another one.
    pub async fn try_start(&self) -> bool {
        let mut status = self.status.lock().await;
        if matches!(*status, JobStatus::Running { .. }) {
            return false;
        }
        *status = JobStatus::Running {
            started_at: Utc::now().timestamp_millis(),
        };
        true
    }

    pub async fn complete(&self, report: RunReport) {
        let mut status = self.status.lock().await;
        *status = JobStatus::Completed {
            finished_at: Utc::now().timestamp_millis(),
            report,
        };
    }

    pub async fn fail(&self, error: String) {
        let mut status = self.status.lock().await;
        *status = JobStatus::Failed {
            finished_at: Utc::now().timestamp_millis(),
            error,
        };
    }

    pub async fn status(&self) -> JobStatus {
        self.status.lock().await.clone()
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}
