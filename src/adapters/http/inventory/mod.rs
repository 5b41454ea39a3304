//! Inventory HTTP adapter module.
//!
//! Provides REST API endpoints for uploading a dataset and querying its
//! analytics.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::InventoryAppState;
pub use routes::inventory_routes;
