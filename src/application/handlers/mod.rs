//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod inventory;

pub use inventory::{
    AnalyticsSettings, GetAbcClassificationHandler, GetAbcClassificationQuery, GetAlertsHandler,
    GetAlertsQuery, GetKpisHandler, GetKpisQuery, GetLatestSummaryHandler, GetLatestSummaryQuery,
    InventoryError, SimulateWhatIfHandler, SimulateWhatIfQuery, UploadInventoryCommand,
    UploadInventoryHandler, UploadInventoryResult,
};
