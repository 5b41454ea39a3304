//! In-Memory Summary Sink Adapter
//!
//! Keeps the latest run summary in memory. Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{RunSummary, SummarySink, SummarySinkError};

/// In-memory sink for run summaries
#[derive(Debug, Clone, Default)]
pub struct InMemorySummarySink {
    latest: Arc<RwLock<Option<RunSummary>>>,
    published: Arc<RwLock<usize>>,
}

impl InMemorySummarySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of summaries published so far
    pub async fn publish_count(&self) -> usize {
        *self.published.read().await
    }
}

#[async_trait]
impl SummarySink for InMemorySummarySink {
    async fn publish(&self, summary: &RunSummary) -> Result<(), SummarySinkError> {
        *self.latest.write().await = Some(summary.clone());
        *self.published.write().await += 1;
        Ok(())
    }

    async fn latest(&self) -> Result<RunSummary, SummarySinkError> {
        self.latest
            .read()
            .await
            .clone()
            .ok_or(SummarySinkError::NotFound)
    }
}
