//! Immutable dataset snapshot shared by concurrent analyses.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::normalizer::{NormalizationReport, NormalizedDataset};
use super::record::{NormalizedRecord, RotationSignal};
use crate::domain::foundation::DatasetId;

/// A normalized dataset as loaded by one upload.
///
/// Snapshots are never mutated; a new upload builds a new snapshot and the
/// dataset store swaps it in as a whole.
#[derive(Debug, Clone, Serialize)]
pub struct InventorySnapshot {
    pub id: DatasetId,
    pub source_name: Option<String>,
    pub loaded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub dataset: NormalizedDataset,
}

impl InventorySnapshot {
    pub fn new(dataset: NormalizedDataset, source_name: Option<String>) -> Self {
        Self {
            id: DatasetId::new(),
            source_name,
            loaded_at: Utc::now(),
            dataset,
        }
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.dataset.records
    }

    pub fn rotation(&self) -> &RotationSignal {
        &self.dataset.rotation
    }

    pub fn report(&self) -> &NormalizationReport {
        &self.dataset.report
    }
}
