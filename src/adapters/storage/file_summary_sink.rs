//! File-based Summary Sink Adapter
//!
//! Writes the latest run summary into a reports directory:
//!
//! - `latest_summary.json` - the full summary, pretty-printed
//! - `latest_run.txt` - a one-line description of the run
//!
//! Each file is written to a uniquely named temporary sibling and renamed
//! into place, so a reader never sees a partially written summary.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::ports::{RunSummary, SummarySink, SummarySinkError};

/// File name of the JSON summary.
pub const SUMMARY_FILE: &str = "latest_summary.json";

/// File name of the one-line run description.
pub const RUN_FILE: &str = "latest_run.txt";

/// File-based sink for run summaries
#[derive(Debug, Clone)]
pub struct FileSummarySink {
    reports_path: PathBuf,
}

impl FileSummarySink {
    /// Create a sink writing into `reports_path`
    ///
    /// The directory is created on first publish.
    pub fn new<P: AsRef<Path>>(reports_path: P) -> Self {
        Self {
            reports_path: reports_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the JSON summary
    pub fn summary_path(&self) -> PathBuf {
        self.reports_path.join(SUMMARY_FILE)
    }

    /// Path of the run description
    pub fn run_path(&self) -> PathBuf {
        self.reports_path.join(RUN_FILE)
    }

    /// Write `contents` to `path` through a temporary file and rename
    async fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<(), SummarySinkError> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, contents)
            .await
            .map_err(|e| SummarySinkError::IoError(e.to_string()))?;
        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(SummarySinkError::IoError(e.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SummarySink for FileSummarySink {
    async fn publish(&self, summary: &RunSummary) -> Result<(), SummarySinkError> {
        fs::create_dir_all(&self.reports_path)
            .await
            .map_err(|e| SummarySinkError::IoError(e.to_string()))?;

        let json = serde_json::to_vec_pretty(summary)
            .map_err(|e| SummarySinkError::SerializationFailed(e.to_string()))?;

        self.write_atomic(&self.summary_path(), &json).await?;
        self.write_atomic(&self.run_path(), format!("{}\n", summary.run_line()).as_bytes())
            .await?;

        tracing::debug!(
            path = %self.summary_path().display(),
            dataset_id = %summary.dataset_id,
            "Published run summary"
        );
        Ok(())
    }

    async fn latest(&self) -> Result<RunSummary, SummarySinkError> {
        let path = self.summary_path();
        let json = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SummarySinkError::NotFound)
            }
            Err(e) => return Err(SummarySinkError::IoError(e.to_string())),
        };

        serde_json::from_slice(&json)
            .map_err(|e| SummarySinkError::DeserializationFailed(e.to_string()))
    }
}
