use std::path::PathBuf;

use chrono::Utc;

use crate::{error::CollectError, types::PlayHistoryItem};

/// Persists a collected result set as a pretty-printed JSON artifact.
pub struct ResultSink {
    output_dir: PathBuf,
}

impl ResultSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Writes the items to `result-<epoch-ms>.json` under the output
    /// directory and returns the path.
    ///
    /// An empty result set produces no artifact and returns `Ok(None)`.
    /// An existing file at the derived path bumps the stamp; an earlier
    /// artifact is never overwritten.
    pub async fn write(&self, items: &[PlayHistoryItem]) -> Result<Option<PathBuf>, CollectError> {
        if items.is_empty() {
            return Ok(None);
        }

        async_fs::create_dir_all(&self.output_dir).await?;

        let json = serde_json::to_string_pretty(items)
            .map_err(|e| CollectError::Persistence(e.into()))?;

        let mut stamp = Utc::now().timestamp_millis();
        let mut path = self.artifact_path(stamp);
        while async_fs::metadata(&path).await.is_ok() {
            stamp += 1;
            path = self.artifact_path(stamp);
        }

        async_fs::write(&path, json).await?;
        Ok(Some(path))
    }

    fn artifact_path(&self, stamp: i64) -> PathBuf {
        self.output_dir.join(format!("result-{}.json", stamp))
    }
}
