//! GetKpisHandler - Query handler for inventory KPIs.

use std::sync::Arc;

use super::error::InventoryError;
use crate::domain::analysis::{InventoryKpis, KpiAggregator};
use crate::ports::DatasetStore;

/// Query for KPIs of the current dataset.
#[derive(Debug, Clone, Default)]
pub struct GetKpisQuery;

/// Result of a KPI query.
pub type GetKpisResult = InventoryKpis;

/// Handler for KPI queries.
pub struct GetKpisHandler {
    store: Arc<dyn DatasetStore>,
}

impl GetKpisHandler {
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _query: GetKpisQuery) -> Result<GetKpisResult, InventoryError> {
        let snapshot = self.store.current().await?;
        Ok(KpiAggregator::compute(snapshot.records()))
    }
}
