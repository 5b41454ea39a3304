//! HTTP handlers for inventory endpoints.
//!
//! These handlers connect Axum routes to application layer handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::application::handlers::inventory::{
    AnalyticsSettings, GetAbcClassificationHandler, GetAbcClassificationQuery, GetAlertsHandler,
    GetAlertsQuery, GetKpisHandler, GetKpisQuery, GetLatestSummaryHandler, GetLatestSummaryQuery,
    InventoryError, SimulateWhatIfHandler, SimulateWhatIfQuery, UploadInventoryCommand,
    UploadInventoryHandler,
};
use crate::domain::foundation::ErrorCode;
use crate::ports::{DatasetStore, SummarySink};

use super::dto::{
    split_upload_body, AbcClassification, AlertReport, ErrorResponse, InventoryKpis, RunSummary,
    UploadResponse, WhatIfResult,
};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Inventory API error that implements IntoResponse.
#[derive(Debug)]
pub enum InventoryApiError {
    BadRequest(ErrorResponse),
    NotFound(ErrorResponse),
    Internal(ErrorResponse),
}

impl IntoResponse for InventoryApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            InventoryApiError::BadRequest(error) => (StatusCode::BAD_REQUEST, error),
            InventoryApiError::NotFound(error) => (StatusCode::NOT_FOUND, error),
            InventoryApiError::Internal(error) => {
                tracing::error!(code = %error.code, message = %error.message, "Inventory request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, error)
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<InventoryError> for InventoryApiError {
    fn from(error: InventoryError) -> Self {
        let response = ErrorResponse::new(error.code(), error.to_string());
        match error {
            InventoryError::Validation(ref invalid) => InventoryApiError::BadRequest(
                response.with_details(serde_json::json!({ "field": invalid.field() })),
            ),
            InventoryError::DatasetNotLoaded | InventoryError::SummaryNotFound => {
                InventoryApiError::NotFound(response)
            }
            InventoryError::Storage(_) => InventoryApiError::Internal(response),
        }
    }
}

impl From<JsonRejection> for InventoryApiError {
    fn from(rejection: JsonRejection) -> Self {
        InventoryApiError::BadRequest(ErrorResponse::bad_request(rejection.body_text()))
    }
}

impl From<QueryRejection> for InventoryApiError {
    fn from(rejection: QueryRejection) -> Self {
        InventoryApiError::BadRequest(ErrorResponse::bad_request(rejection.body_text()))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing inventory dependencies.
#[derive(Clone)]
pub struct InventoryAppState {
    pub dataset_store: Arc<dyn DatasetStore>,
    pub summary_sink: Arc<dyn SummarySink>,
    pub settings: AnalyticsSettings,
    upload_lock: Arc<Mutex<()>>,
}

impl InventoryAppState {
    pub fn new(
        dataset_store: Arc<dyn DatasetStore>,
        summary_sink: Arc<dyn SummarySink>,
        settings: AnalyticsSettings,
    ) -> Self {
        Self {
            dataset_store,
            summary_sink,
            settings,
            upload_lock: Arc::default(),
        }
    }

    pub fn upload_handler(&self) -> UploadInventoryHandler {
        UploadInventoryHandler::new(
            self.dataset_store.clone(),
            self.summary_sink.clone(),
            self.settings,
            self.upload_lock.clone(),
        )
    }

    pub fn kpis_handler(&self) -> GetKpisHandler {
        GetKpisHandler::new(self.dataset_store.clone())
    }

    pub fn abc_handler(&self) -> GetAbcClassificationHandler {
        GetAbcClassificationHandler::new(self.dataset_store.clone(), self.settings.classifier)
    }

    pub fn alerts_handler(&self) -> GetAlertsHandler {
        GetAlertsHandler::new(
            self.dataset_store.clone(),
            self.settings.alert_engine,
            self.settings.default_alert_limit,
        )
    }

    pub fn what_if_handler(&self) -> SimulateWhatIfHandler {
        SimulateWhatIfHandler::new(self.dataset_store.clone())
    }

    pub fn summary_handler(&self) -> GetLatestSummaryHandler {
        GetLatestSummaryHandler::new(self.summary_sink.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Parameters
// ════════════════════════════════════════════════════════════════════════════════

/// Query parameters for the alerts endpoint.
#[derive(Debug, Deserialize)]
pub struct AlertsParams {
    /// Keep only the N highest-impact alerts.
    pub top: Option<usize>,
}

/// Query parameters for the what-if endpoint.
#[derive(Debug, Deserialize)]
pub struct WhatIfParams {
    pub categoria: String,
    pub porcentaje_reduccion: f64,
    pub top_n: Option<usize>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/inventory/upload
///
/// Loads a new dataset, replacing the current one.
pub async fn upload_inventory(
    State(state): State<InventoryAppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), InventoryApiError> {
    let Json(body) = body?;
    let (rows, source_name) = split_upload_body(body);

    let handler = state.upload_handler();
    let result = handler
        .handle(UploadInventoryCommand { rows, source_name })
        .await?;

    Ok((StatusCode::CREATED, Json(result.into())))
}

/// GET /api/inventory/kpis
pub async fn get_kpis(
    State(state): State<InventoryAppState>,
) -> Result<Json<InventoryKpis>, InventoryApiError> {
    let kpis = state.kpis_handler().handle(GetKpisQuery).await?;
    Ok(Json(kpis))
}

/// GET /api/inventory/abc
pub async fn get_abc_classification(
    State(state): State<InventoryAppState>,
) -> Result<Json<AbcClassification>, InventoryApiError> {
    let classification = state.abc_handler().handle(GetAbcClassificationQuery).await?;
    Ok(Json(classification))
}

/// GET /api/inventory/alerts?top=N
pub async fn get_alerts(
    State(state): State<InventoryAppState>,
    params: Result<Query<AlertsParams>, QueryRejection>,
) -> Result<Json<AlertReport>, InventoryApiError> {
    let Query(params) = params?;
    let report = state
        .alerts_handler()
        .handle(GetAlertsQuery { top: params.top })
        .await?;
    Ok(Json(report))
}

/// GET /api/inventory/what-if?categoria=..&porcentaje_reduccion=..&top_n=N
///
/// Read-only projection; never modifies the loaded dataset.
pub async fn simulate_what_if(
    State(state): State<InventoryAppState>,
    params: Result<Query<WhatIfParams>, QueryRejection>,
) -> Result<Json<WhatIfResult>, InventoryApiError> {
    let Query(params) = params?;
    let query = SimulateWhatIfQuery {
        categoria: params.categoria,
        porcentaje_reduccion: params.porcentaje_reduccion,
        top_n: params.top_n,
    };
    let result = state.what_if_handler().handle(query).await?;
    Ok(Json(result))
}

/// GET /api/inventory/summary
pub async fn get_latest_summary(
    State(state): State<InventoryAppState>,
) -> Result<Json<RunSummary>, InventoryApiError> {
    let summary = state.summary_handler().handle(GetLatestSummaryQuery).await?;
    Ok(Json(summary))
}
