//! GetAlertsHandler - Query handler for ranked inventory alerts.

use std::sync::Arc;

use super::error::InventoryError;
use crate::domain::analysis::{AlertEngine, AlertReport};
use crate::domain::foundation::ValidationError;
use crate::ports::DatasetStore;

/// Query for alerts over the current dataset.
#[derive(Debug, Clone, Default)]
pub struct GetAlertsQuery {
    /// Keep only the N highest-impact alerts. Must be positive when given.
    pub top: Option<usize>,
}

/// Result of an alerts query.
pub type GetAlertsResult = AlertReport;

/// Handler for alert queries.
pub struct GetAlertsHandler {
    store: Arc<dyn DatasetStore>,
    engine: AlertEngine,
    default_top: Option<usize>,
}

impl GetAlertsHandler {
    pub fn new(store: Arc<dyn DatasetStore>, engine: AlertEngine, default_top: Option<usize>) -> Self {
        Self {
            store,
            engine,
            default_top,
        }
    }

    pub async fn handle(&self, query: GetAlertsQuery) -> Result<GetAlertsResult, InventoryError> {
        if query.top == Some(0) {
            return Err(ValidationError::out_of_range("top", 1.0, f64::MAX, 0.0).into());
        }

        let snapshot = self.store.current().await?;
        let top = query.top.or(self.default_top);
        Ok(self
            .engine
            .evaluate(snapshot.records(), snapshot.rotation(), top))
    }
}
