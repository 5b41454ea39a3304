//! HTTP DTOs for inventory endpoints.
//!
//! The analytics results are already designed for serialization, so query
//! endpoints return the domain types directly. Only the upload has its own
//! request and response shapes.

pub use crate::domain::analysis::{AbcClassification, AlertReport, InventoryKpis, WhatIfResult};
pub use crate::ports::RunSummary;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::UploadInventoryResult;
use crate::domain::foundation::{DatasetId, ErrorCode};
use crate::domain::inventory::{NormalizationReport, RotationSignal};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Upload body in envelope form. A bare JSON array is accepted as well.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadEnvelope {
    pub rows: Value,
    #[serde(default)]
    pub source_name: Option<String>,
}

/// Splits an upload body into rows and optional source name.
///
/// Objects carrying a `rows` key are treated as envelopes; anything else is
/// passed through as the rows themselves and validated downstream.
pub fn split_upload_body(body: Value) -> (Value, Option<String>) {
    let is_envelope = body
        .as_object()
        .map_or(false, |map| map.contains_key("rows"));
    if is_envelope {
        if let Ok(envelope) = serde_json::from_value::<UploadEnvelope>(body.clone()) {
            return (envelope.rows, envelope.source_name);
        }
    }
    (body, None)
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response to a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub dataset_id: DatasetId,
    pub rows: usize,
    pub replaced: bool,
    pub rotation: RotationSignal,
    pub normalization: NormalizationReport,
    pub total_alertas: usize,
    pub capital_en_riesgo_pct: f64,
}

impl From<UploadInventoryResult> for UploadResponse {
    fn from(result: UploadInventoryResult) -> Self {
        Self {
            dataset_id: result.dataset_id,
            rows: result.report.rows,
            replaced: result.replaced,
            rotation: result.rotation,
            normalization: result.report,
            total_alertas: result.summary.total_alertas,
            capital_en_riesgo_pct: result.summary.capital_en_riesgo_pct,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}
