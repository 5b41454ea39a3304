//! GetLatestSummaryHandler - Query handler for the last published run summary.

use std::sync::Arc;

use super::error::InventoryError;
use crate::ports::{RunSummary, SummarySink};

/// Query for the latest run summary.
#[derive(Debug, Clone, Default)]
pub struct GetLatestSummaryQuery;

/// Result of a latest-summary query.
pub type GetLatestSummaryResult = RunSummary;

/// Handler for latest-summary queries.
pub struct GetLatestSummaryHandler {
    sink: Arc<dyn SummarySink>,
}

impl GetLatestSummaryHandler {
    pub fn new(sink: Arc<dyn SummarySink>) -> Self {
        Self { sink }
    }

    pub async fn handle(
        &self,
        _query: GetLatestSummaryQuery,
    ) -> Result<GetLatestSummaryResult, InventoryError> {
        Ok(self.sink.latest().await?)
    }
}
