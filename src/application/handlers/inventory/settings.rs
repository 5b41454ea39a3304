//! Analytics settings shared by the inventory handlers.

use crate::domain::analysis::{AbcClassifier, AlertEngine};
use crate::domain::inventory::Normalizer;

/// Configured analytics services.
///
/// Built once from configuration and copied into each handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsSettings {
    pub normalizer: Normalizer,
    pub classifier: AbcClassifier,
    pub alert_engine: AlertEngine,
    /// Alert limit applied when a query does not pass `top`.
    pub default_alert_limit: Option<usize>,
}
