//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates the upload command (write) from the
//! analytics queries (read).

pub mod handlers;

pub use handlers::{
    AnalyticsSettings, GetAbcClassificationHandler, GetAbcClassificationQuery, GetAlertsHandler,
    GetAlertsQuery, GetKpisHandler, GetKpisQuery, GetLatestSummaryHandler, GetLatestSummaryQuery,
    InventoryError, SimulateWhatIfHandler, SimulateWhatIfQuery, UploadInventoryCommand,
    UploadInventoryHandler, UploadInventoryResult,
};
