//! SimulateWhatIfHandler - Query handler for capital release projections.

use std::sync::Arc;

use tracing::debug;

use super::error::InventoryError;
use crate::domain::analysis::{WhatIfRequest, WhatIfResult, WhatIfSimulator};
use crate::domain::foundation::ValidationError;
use crate::ports::DatasetStore;

/// Query for a what-if simulation.
#[derive(Debug, Clone)]
pub struct SimulateWhatIfQuery {
    pub categoria: String,
    /// Clamped into 0-100; NaN counts as 0.
    pub porcentaje_reduccion: f64,
    /// Must be positive when given.
    pub top_n: Option<usize>,
}

/// Result of a simulation.
pub type SimulateWhatIfResult = WhatIfResult;

/// Handler for what-if simulations. Never modifies the dataset.
pub struct SimulateWhatIfHandler {
    store: Arc<dyn DatasetStore>,
}

impl SimulateWhatIfHandler {
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: SimulateWhatIfQuery,
    ) -> Result<SimulateWhatIfResult, InventoryError> {
        if query.top_n == Some(0) {
            return Err(ValidationError::out_of_range("top_n", 1.0, f64::MAX, 0.0).into());
        }

        let snapshot = self.store.current().await?;
        let request = WhatIfRequest::new(query.categoria, query.porcentaje_reduccion, query.top_n);
        if request.porcentaje_reduccion.value() != query.porcentaje_reduccion {
            debug!(
                requested = query.porcentaje_reduccion,
                applied = request.porcentaje_reduccion.value(),
                "Clamped what-if reduction percentage"
            );
        }

        Ok(WhatIfSimulator::simulate(snapshot.records(), &request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::inventory::test_support::{sample_rows, MockDatasetStore};

    fn handler() -> SimulateWhatIfHandler {
        SimulateWhatIfHandler::new(Arc::new(MockDatasetStore::with_rows(sample_rows())))
    }

    fn query(categoria: &str, pct: f64, top_n: Option<usize>) -> SimulateWhatIfQuery {
        SimulateWhatIfQuery {
            categoria: categoria.to_string(),
            porcentaje_reduccion: pct,
            top_n,
        }
    }

    #[tokio::test]
    async fn test_simulates_top_item_of_category() {
        let result = handler().handle(query("Tools", 20.0, Some(1))).await.unwrap();
        assert_eq!(result.capital_liberado, 60.0);
        assert_eq!(result.items_considered, 1);
    }

    #[tokio::test]
    async fn test_clamps_percentage() {
        let result = handler().handle(query("tools", 250.0, None)).await.unwrap();
        assert_eq!(result.porcentaje_reduccion.value(), 100.0);
        assert_eq!(result.capital_liberado, 400.0);
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_an_error() {
        let result = handler().handle(query("Garden", 20.0, None)).await.unwrap();
        assert_eq!(result.capital_liberado, 0.0);
        assert!(result.mensaje.is_some());
    }

    #[tokio::test]
    async fn test_rejects_zero_top_n() {
        let result = handler().handle(query("Tools", 20.0, Some(0))).await;
        assert!(matches!(result, Err(InventoryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_requires_dataset() {
        let handler = SimulateWhatIfHandler::new(Arc::new(MockDatasetStore::empty()));
        let result = handler.handle(query("Tools", 20.0, None)).await;
        assert!(matches!(result, Err(InventoryError::DatasetNotLoaded)));
    }
}
