//! HTTP routes for inventory endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    get_abc_classification, get_alerts, get_kpis, get_latest_summary, simulate_what_if,
    upload_inventory, InventoryAppState,
};

/// Creates the inventory router with all routes.
pub fn inventory_routes(state: InventoryAppState) -> Router {
    Router::new()
        // POST /api/inventory/upload
        .route("/api/inventory/upload", post(upload_inventory))
        // GET /api/inventory/kpis
        .route("/api/inventory/kpis", get(get_kpis))
        // GET /api/inventory/abc
        .route("/api/inventory/abc", get(get_abc_classification))
        // GET /api/inventory/alerts?top=N
        .route("/api/inventory/alerts", get(get_alerts))
        // GET /api/inventory/what-if?categoria=..&porcentaje_reduccion=..&top_n=N
        .route("/api/inventory/what-if", get(simulate_what_if))
        // GET /api/inventory/summary
        .route("/api/inventory/summary", get(get_latest_summary))
        .with_state(state)
}
