//! Inventory command and query handlers.
//!
//! `UploadInventoryHandler` is the only writer: it normalizes a payload,
//! swaps the dataset snapshot and publishes the run summary. Every query
//! handler reads the current snapshot and runs one pure analysis over it.

mod error;
mod get_abc_classification;
mod get_alerts;
mod get_kpis;
mod get_latest_summary;
mod settings;
mod simulate_what_if;
mod summary;
mod upload_inventory;

pub use error::InventoryError;
pub use get_abc_classification::{
    GetAbcClassificationHandler, GetAbcClassificationQuery, GetAbcClassificationResult,
};
pub use get_alerts::{GetAlertsHandler, GetAlertsQuery, GetAlertsResult};
pub use get_kpis::{GetKpisHandler, GetKpisQuery, GetKpisResult};
pub use get_latest_summary::{
    GetLatestSummaryHandler, GetLatestSummaryQuery, GetLatestSummaryResult,
};
pub use settings::AnalyticsSettings;
pub use simulate_what_if::{SimulateWhatIfHandler, SimulateWhatIfQuery, SimulateWhatIfResult};
pub use summary::{capital_en_riesgo_pct, summarize};
pub use upload_inventory::{UploadInventoryCommand, UploadInventoryHandler, UploadInventoryResult};
