//! In-Memory Dataset Store Adapter
//!
//! Holds the current snapshot in an `Arc` under a tokio `RwLock`. Readers
//! clone the `Arc` and release the lock immediately, so a long analysis
//! never blocks an upload.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::inventory::InventorySnapshot;
use crate::ports::{DatasetStore, DatasetStoreError};

/// In-memory holder for the current inventory snapshot
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatasetStore {
    current: Arc<RwLock<Option<Arc<InventorySnapshot>>>>,
}

impl InMemoryDatasetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DatasetStore for InMemoryDatasetStore {
    async fn replace(
        &self,
        snapshot: InventorySnapshot,
    ) -> Result<Option<Arc<InventorySnapshot>>, DatasetStoreError> {
        let mut current = self.current.write().await;
        Ok(current.replace(Arc::new(snapshot)))
    }

    async fn current(&self) -> Result<Arc<InventorySnapshot>, DatasetStoreError> {
        self.current
            .read()
            .await
            .clone()
            .ok_or(DatasetStoreError::NotLoaded)
    }
}
