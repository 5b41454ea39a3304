//! Dataset Store Port - Holds the currently loaded inventory snapshot.
//!
//! Analytics never mutate a snapshot. Loading a new dataset swaps the whole
//! snapshot, so readers observe either the old one or the new one.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::inventory::InventorySnapshot;

/// Errors that can occur when reading or replacing the dataset
#[derive(Debug, thiserror::Error)]
pub enum DatasetStoreError {
    #[error("No inventory dataset has been loaded")]
    NotLoaded,

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Port for the current inventory snapshot
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Replaces the current snapshot, returning the previous one if any.
    async fn replace(
        &self,
        snapshot: InventorySnapshot,
    ) -> Result<Option<Arc<InventorySnapshot>>, DatasetStoreError>;

    /// Returns the current snapshot.
    ///
    /// # Errors
    /// Returns `DatasetStoreError::NotLoaded` before the first upload
    async fn current(&self) -> Result<Arc<InventorySnapshot>, DatasetStoreError>;
}
