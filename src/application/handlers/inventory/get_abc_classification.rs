//! GetAbcClassificationHandler - Query handler for ABC classification.

use std::sync::Arc;

use super::error::InventoryError;
use crate::domain::analysis::{AbcClassification, AbcClassifier};
use crate::ports::DatasetStore;

/// Query for the ABC classification of the current dataset.
#[derive(Debug, Clone, Default)]
pub struct GetAbcClassificationQuery;

/// Result of an ABC query.
pub type GetAbcClassificationResult = AbcClassification;

/// Handler for ABC classification queries.
pub struct GetAbcClassificationHandler {
    store: Arc<dyn DatasetStore>,
    classifier: AbcClassifier,
}

impl GetAbcClassificationHandler {
    pub fn new(store: Arc<dyn DatasetStore>, classifier: AbcClassifier) -> Self {
        Self { store, classifier }
    }

    pub async fn handle(
        &self,
        _query: GetAbcClassificationQuery,
    ) -> Result<GetAbcClassificationResult, InventoryError> {
        let snapshot = self.store.current().await?;
        Ok(self.classifier.classify(snapshot.records()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::inventory::test_support::MockDatasetStore;
    use crate::domain::analysis::AbcClass;
    use serde_json::json;

    #[tokio::test]
    async fn test_classifies_current_dataset() {
        let rows = json!([
            { "codigo": "PR001", "cantidad": 1, "precio": 800 },
            { "codigo": "PR002", "cantidad": 1, "precio": 150 },
            { "codigo": "PR003", "cantidad": 1, "precio": 50 }
        ]);
        let handler = GetAbcClassificationHandler::new(
            Arc::new(MockDatasetStore::with_rows(rows)),
            AbcClassifier::default(),
        );

        let result = handler.handle(GetAbcClassificationQuery).await.unwrap();

        let classes: Vec<(String, AbcClass)> = result
            .detalle
            .iter()
            .map(|e| (e.record.codigo.clone(), e.clase))
            .collect();
        assert_eq!(
            classes,
            vec![
                ("PR001".to_string(), AbcClass::A),
                ("PR002".to_string(), AbcClass::B),
                ("PR003".to_string(), AbcClass::C),
            ]
        );
    }

    #[tokio::test]
    async fn test_classification_without_dataset() {
        let handler = GetAbcClassificationHandler::new(
            Arc::new(MockDatasetStore::empty()),
            AbcClassifier::default(),
        );
        let result = handler.handle(GetAbcClassificationQuery).await;
        assert!(matches!(result, Err(InventoryError::DatasetNotLoaded)));
    }
}
