//! UploadInventoryHandler - Command handler for loading a new dataset.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::error::InventoryError;
use super::settings::AnalyticsSettings;
use super::summary::summarize;
use crate::domain::foundation::DatasetId;
use crate::domain::inventory::{InventorySnapshot, NormalizationReport, RotationSignal};
use crate::ports::{DatasetStore, RunSummary, SummarySink};

/// Command to replace the current dataset with freshly uploaded rows.
#[derive(Debug, Clone)]
pub struct UploadInventoryCommand {
    /// Already-parsed rows: a JSON array of objects keyed by column name.
    pub rows: Value,
    /// Original file name, if the caller knows it.
    pub source_name: Option<String>,
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadInventoryResult {
    pub dataset_id: DatasetId,
    pub report: NormalizationReport,
    pub rotation: RotationSignal,
    /// Whether a previously loaded dataset was replaced.
    pub replaced: bool,
    pub summary: RunSummary,
}

/// Handler for dataset uploads.
///
/// Handlers sharing one `upload_lock` swap the dataset and publish its
/// summary as a single step, so the latest summary always describes the
/// current dataset.
pub struct UploadInventoryHandler {
    store: Arc<dyn DatasetStore>,
    sink: Arc<dyn SummarySink>,
    settings: AnalyticsSettings,
    upload_lock: Arc<Mutex<()>>,
}

impl UploadInventoryHandler {
    pub fn new(
        store: Arc<dyn DatasetStore>,
        sink: Arc<dyn SummarySink>,
        settings: AnalyticsSettings,
        upload_lock: Arc<Mutex<()>>,
    ) -> Self {
        Self {
            store,
            sink,
            settings,
            upload_lock,
        }
    }

    pub async fn handle(
        &self,
        cmd: UploadInventoryCommand,
    ) -> Result<UploadInventoryResult, InventoryError> {
        // 1. Normalize (the only step that can reject the payload)
        let dataset = self.settings.normalizer.normalize_payload(&cmd.rows)?;
        let report = dataset.report;
        info!(
            rows = report.rows,
            synthesized_codes = report.synthesized_codes,
            default_names = report.default_names,
            default_categories = report.default_categories,
            coerced_numbers = report.coerced_numbers,
            recomputed_totals = report.recomputed_totals,
            "Normalized inventory upload"
        );

        // 2. Build snapshot and summary before publishing anything
        let snapshot = InventorySnapshot::new(dataset, cmd.source_name);
        let summary = summarize(&snapshot, &self.settings);
        let dataset_id = snapshot.id;
        let rotation = snapshot.rotation().clone();

        // 3. Swap the dataset and publish its summary under the upload lock
        let guard = self.upload_lock.lock().await;
        let previous = self.store.replace(snapshot).await?;

        // A publish failure does not undo the upload
        if let Err(err) = self.sink.publish(&summary).await {
            warn!(dataset_id = %dataset_id, error = %err, "Failed to publish run summary");
        }
        drop(guard);

        info!(
            dataset_id = %dataset_id,
            replaced = previous.is_some(),
            alerts = summary.total_alertas,
            "Inventory dataset loaded"
        );

        Ok(UploadInventoryResult {
            dataset_id,
            report,
            rotation,
            replaced: previous.is_some(),
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::inventory::test_support::{
        sample_rows, MockDatasetStore, MockSummarySink,
    };
    use crate::ports::SummarySinkError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn handler(
        store: Arc<MockDatasetStore>,
        sink: Arc<MockSummarySink>,
    ) -> UploadInventoryHandler {
        UploadInventoryHandler::new(store, sink, AnalyticsSettings::default(), Arc::default())
    }

    /// Sink whose first publish is slow, letting a later upload overtake it.
    struct SlowFirstPublishSink {
        calls: AtomicUsize,
        inner: MockSummarySink,
    }

    #[async_trait]
    impl SummarySink for SlowFirstPublishSink {
        async fn publish(&self, summary: &RunSummary) -> Result<(), SummarySinkError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                for _ in 0..5 {
                    tokio::task::yield_now().await;
                }
            }
            self.inner.publish(summary).await
        }

        async fn latest(&self) -> Result<RunSummary, SummarySinkError> {
            self.inner.latest().await
        }
    }

    fn command(rows: Value) -> UploadInventoryCommand {
        UploadInventoryCommand {
            rows,
            source_name: Some("inventario.xlsx".to_string()),
        }
    }

    #[tokio::test]
    async fn test_upload_stores_snapshot_and_publishes_summary() {
        let store = Arc::new(MockDatasetStore::empty());
        let sink = Arc::new(MockSummarySink::new());
        let handler = handler(store.clone(), sink.clone());

        let result = handler.handle(command(sample_rows())).await.unwrap();

        assert_eq!(result.report.rows, 3);
        assert!(!result.replaced);
        assert_eq!(result.rotation, RotationSignal::AssumedZero);

        let stored = store.stored().unwrap();
        assert_eq!(stored.id, result.dataset_id);
        assert_eq!(stored.source_name.as_deref(), Some("inventario.xlsx"));

        let published = sink.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].dataset_id, result.dataset_id);
    }

    #[tokio::test]
    async fn test_upload_reports_replacement() {
        let store = Arc::new(MockDatasetStore::with_rows(sample_rows()));
        let handler = handler(store, Arc::new(MockSummarySink::new()));

        let result = handler.handle(command(sample_rows())).await.unwrap();
        assert!(result.replaced);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_array_payload() {
        let store = Arc::new(MockDatasetStore::empty());
        let sink = Arc::new(MockSummarySink::new());
        let handler = handler(store.clone(), sink.clone());

        let result = handler.handle(command(json!({ "codigo": "PR001" }))).await;

        assert!(matches!(result, Err(InventoryError::Validation(_))));
        assert!(store.stored().is_none());
        assert!(sink.published().is_empty());
    }

    #[tokio::test]
    async fn test_upload_names_first_bad_row() {
        let handler = handler(
            Arc::new(MockDatasetStore::empty()),
            Arc::new(MockSummarySink::new()),
        );

        let err = handler
            .handle(command(json!([{ "codigo": "PR001" }, 42])))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("rows[1]"));
    }

    #[tokio::test]
    async fn test_upload_succeeds_when_summary_publish_fails() {
        let store = Arc::new(MockDatasetStore::empty());
        let handler = handler(store.clone(), Arc::new(MockSummarySink::failing()));

        let result = handler.handle(command(sample_rows())).await;

        assert!(result.is_ok());
        assert!(store.stored().is_some());
    }

    #[tokio::test]
    async fn test_upload_fails_when_store_fails() {
        let sink = Arc::new(MockSummarySink::new());
        let handler = handler(Arc::new(MockDatasetStore::failing()), sink.clone());

        let result = handler.handle(command(sample_rows())).await;

        assert!(matches!(result, Err(InventoryError::Storage(_))));
        assert!(sink.published().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_uploads_keep_summary_in_step_with_dataset() {
        let store = Arc::new(MockDatasetStore::empty());
        let sink = Arc::new(SlowFirstPublishSink {
            calls: AtomicUsize::new(0),
            inner: MockSummarySink::new(),
        });
        let lock = Arc::new(Mutex::new(()));
        let first = UploadInventoryHandler::new(
            store.clone(),
            sink.clone(),
            AnalyticsSettings::default(),
            lock.clone(),
        );
        let second =
            UploadInventoryHandler::new(store.clone(), sink.clone(), AnalyticsSettings::default(), lock);

        let (a, b) = tokio::join!(
            first.handle(command(sample_rows())),
            second.handle(command(json!([{ "codigo": "PR009", "cantidad": 1, "precio": 5 }])))
        );
        a.unwrap();
        b.unwrap();

        let stored = store.stored().unwrap();
        let latest = sink.latest().await.unwrap();
        assert_eq!(latest.dataset_id, stored.id);
    }

    #[tokio::test]
    async fn test_upload_accepts_empty_dataset() {
        let handler = handler(
            Arc::new(MockDatasetStore::empty()),
            Arc::new(MockSummarySink::new()),
        );

        let result = handler.handle(command(json!([]))).await.unwrap();
        assert_eq!(result.report.rows, 0);
        assert_eq!(result.summary.kpis.total_valor, 0.0);
    }
}
