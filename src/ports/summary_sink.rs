//! Summary Sink Port - Publishes the "latest run" summary.
//!
//! Written by the application layer after each successful upload so
//! dashboards can show the last analysis without recomputing it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::analysis::{AbcClass, InventoryKpis};
use crate::domain::foundation::DatasetId;

/// Headline figures of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub dataset_id: DatasetId,
    pub source_name: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub rows: usize,
    pub kpis: InventoryKpis,
    /// Percent of capital held by each ABC class.
    pub pct_capital_abc: BTreeMap<AbcClass, f64>,
    pub total_alertas: usize,
    /// Sum of alert impact as a percent of total value.
    pub capital_en_riesgo_pct: f64,
    pub rotation_note: String,
}

impl RunSummary {
    /// One-line description written next to the JSON summary.
    pub fn run_line(&self) -> String {
        format!(
            "{} dataset={} rows={} alerts={} capital_en_riesgo={:.2}%",
            self.generated_at.to_rfc3339(),
            self.dataset_id,
            self.rows,
            self.total_alertas,
            self.capital_en_riesgo_pct
        )
    }
}

/// Errors that can occur when publishing or reading summaries
#[derive(Debug, thiserror::Error)]
pub enum SummarySinkError {
    #[error("No summary has been published")]
    NotFound,

    #[error("Failed to serialize summary: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize summary: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for the latest-run summary
#[async_trait]
pub trait SummarySink: Send + Sync {
    /// Publishes a summary, replacing the previous one.
    async fn publish(&self, summary: &RunSummary) -> Result<(), SummarySinkError>;

    /// Reads the most recently published summary.
    ///
    /// # Errors
    /// Returns `SummarySinkError::NotFound` if nothing was published yet
    async fn latest(&self) -> Result<RunSummary, SummarySinkError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_line_names_dataset_and_risk() {
        let summary = test_support::summary();
        let line = summary.run_line();
        assert!(line.contains(&summary.dataset_id.to_string()));
        assert!(line.contains("rows=3"));
        assert!(line.contains("capital_en_riesgo=12.50%"));
    }

    #[test]
    fn summary_round_trips_through_json() {
        let summary = test_support::summary();
        let json = serde_json::to_string(&summary).unwrap();
        let back: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            SummarySinkError::NotFound.to_string(),
            "No summary has been published"
        );
        assert!(SummarySinkError::IoError("disk full".to_string())
            .to_string()
            .contains("disk full"));
    }
}
