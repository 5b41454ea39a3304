//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where run summaries are published
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummarySinkKind {
    /// `latest_summary.json` and `latest_run.txt` in the reports directory
    #[default]
    File,
    /// Process memory only
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for published run summaries
    #[serde(default = "default_reports_path")]
    pub reports_path: PathBuf,

    /// Summary sink implementation
    #[serde(default)]
    pub summary_sink: SummarySinkKind,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.summary_sink == SummarySinkKind::File && self.reports_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.reports_path"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            reports_path: default_reports_path(),
            summary_sink: SummarySinkKind::default(),
        }
    }
}

fn default_reports_path() -> PathBuf {
    PathBuf::from("reports")
}
