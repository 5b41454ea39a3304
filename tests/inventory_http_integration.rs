//! Integration tests for inventory HTTP endpoints.
//!
//! These tests drive the full router (layers included) with in-memory and
//! file-backed adapters:
//! 1. Uploads replace the dataset and publish a summary
//! 2. Query endpoints return the analytics of the current dataset
//! 3. Errors map onto the documented status codes and error codes

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use inventory_insights::adapters::{
    api_router, FileSummarySink, InMemoryDatasetStore, InMemorySummarySink, InventoryAppState,
};
use inventory_insights::config::{AnalyticsConfig, ServerConfig};
use inventory_insights::ports::SummarySink;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn router_with_sink(sink: Arc<dyn SummarySink>) -> Router {
    let state = InventoryAppState::new(
        Arc::new(InMemoryDatasetStore::new()),
        sink,
        AnalyticsConfig::default().settings().unwrap(),
    );
    api_router(state, &ServerConfig::default())
}

fn router() -> Router {
    router_with_sink(Arc::new(InMemorySummarySink::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn upload(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/inventory/upload", Some(body)).await
}

fn sample_rows() -> Value {
    json!([
        { "Código": "p 101", "Nombre": "Martillo", "Categoría": "Tools", "Cantidad": "3", "Precio": "$100,00" },
        { "codigo": "PR102", "nombre": "Llave", "categoria": "Tools", "cantidad": 1, "precio": 100 },
        { "sku": "PR103", "name": "Pintura", "category": "Paint", "qty": 4, "price": 50 },
        { "codigo": "", "nombre": "  ", "cantidad": "abc", "precio": null }
    ])
}

// =============================================================================
// Upload
// =============================================================================

#[tokio::test]
async fn upload_returns_normalization_report() {
    let app = router();

    let (status, body) = upload(&app, sample_rows()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["rows"], 4);
    assert_eq!(body["replaced"], false);
    assert_eq!(body["rotation"]["source"], "assumed_zero");
    assert_eq!(body["normalization"]["synthesized_codes"], 1);
    assert_eq!(body["normalization"]["default_names"], 1);
}

#[tokio::test]
async fn upload_accepts_envelope_and_replaces_dataset() {
    let app = router();
    upload(&app, sample_rows()).await;

    let (status, body) = upload(
        &app,
        json!({ "rows": [{ "codigo": "PR200", "cantidad": 2, "precio": 5 }], "source_name": "b.csv" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["replaced"], true);

    let (_, kpis) = get(&app, "/api/inventory/kpis").await;
    assert_eq!(kpis["total_items"], 1);
    assert_eq!(kpis["total_valor"], 10.0);
}

#[tokio::test]
async fn upload_rejects_structurally_invalid_payload() {
    let app = router();

    let (status, body) = upload(&app, json!([{ "codigo": "PR001" }, "not a row"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_FORMAT");
    assert!(body["message"].as_str().unwrap().contains("rows[1]"));

    let (status, _) = get(&app, "/api/inventory/kpis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_rejects_malformed_json() {
    let app = router();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/inventory/upload")
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Queries
// =============================================================================

#[tokio::test]
async fn queries_before_upload_report_dataset_not_loaded() {
    let app = router();

    for uri in [
        "/api/inventory/kpis",
        "/api/inventory/abc",
        "/api/inventory/alerts",
        "/api/inventory/what-if?categoria=Tools&porcentaje_reduccion=20",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["code"], "DATASET_NOT_LOADED", "{}", uri);
    }
}

#[tokio::test]
async fn kpis_reflect_normalized_rows() {
    let app = router();
    upload(&app, sample_rows()).await;

    let (status, kpis) = get(&app, "/api/inventory/kpis").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(kpis["total_items"], 4);
    assert_eq!(kpis["total_valor"], 600.0);
    assert_eq!(kpis["productos_sin_stock"], 1);
    assert_eq!(kpis["valor_por_categoria"]["Tools"], 400.0);
    assert_eq!(kpis["productos_mas_costosos"].as_array().unwrap().len(), 4);
    assert_eq!(kpis["productos_mas_costosos"][2]["codigo"], "PR103");
    assert_eq!(kpis["producto_max_precio"]["precio"], 100.0);
    assert_eq!(kpis["producto_min_precio"]["precio"], 0.0);
}

#[tokio::test]
async fn abc_splits_by_cumulative_value() {
    let app = router();
    upload(
        &app,
        json!([
            { "codigo": "PR001", "cantidad": 1, "precio": 800 },
            { "codigo": "PR002", "cantidad": 1, "precio": 150 },
            { "codigo": "PR003", "cantidad": 1, "precio": 50 }
        ]),
    )
    .await;

    let (status, abc) = get(&app, "/api/inventory/abc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(abc["clases"]["A"]["count"], 1);
    assert_eq!(abc["clases"]["B"]["count"], 1);
    assert_eq!(abc["clases"]["C"]["count"], 1);
    assert_eq!(abc["detalle"][0]["codigo"], "PR001");
    assert_eq!(abc["detalle"][0]["clase"], "A");
}

#[tokio::test]
async fn alerts_flag_dead_capital_without_rotation() {
    let app = router();
    upload(&app, json!([{ "codigo": "PR001", "cantidad": 5, "precio": 100 }])).await;

    let (status, report) = get(&app, "/api/inventory/alerts").await;

    assert_eq!(status, StatusCode::OK);
    let alertas = report["alertas"].as_array().unwrap();
    assert_eq!(alertas.len(), 1);
    assert_eq!(alertas[0]["codigo"], "PR001");
    assert_eq!(alertas[0]["kind"], "CAPITAL_MUERTO");
    assert_eq!(alertas[0]["severity"], "Alta");
    assert_eq!(alertas[0]["impact_value"], 500.0);
    assert!(alertas[0]["recommendation"].as_str().is_some());
    assert!(alertas[0].get("tipo").is_none());
    assert!(report["supuesto_capital_muerto"]
        .as_str()
        .unwrap()
        .contains("supuesto conservador"));
}

#[tokio::test]
async fn alerts_without_top_return_the_full_list() {
    let app = router();
    let rows: Vec<Value> = (0..12)
        .map(|i| {
            json!({
                "codigo": format!("PR{:03}", i),
                "categoria": format!("Cat{}", i),
                "cantidad": 5,
                "precio": 100 + i
            })
        })
        .collect();
    upload(&app, Value::Array(rows)).await;

    let (status, report) = get(&app, "/api/inventory/alerts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_alertas"], 12);
    assert_eq!(report["alertas"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn alerts_top_must_be_positive() {
    let app = router();
    upload(&app, sample_rows()).await;

    let (status, body) = get(&app, "/api/inventory/alerts?top=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "OUT_OF_RANGE");
    assert_eq!(body["details"]["field"], "top");

    let (status, _) = get(&app, "/api/inventory/alerts?top=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, report) = get(&app, "/api/inventory/alerts?top=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["alertas"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn what_if_projects_capital_release() {
    let app = router();
    upload(&app, sample_rows()).await;

    let (status, result) = get(
        &app,
        "/api/inventory/what-if?categoria=tools&porcentaje_reduccion=20&top_n=1",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["categoria"], "Tools");
    assert_eq!(result["capital_liberado"], 60.0);
    assert_eq!(result["items_considered"], 1);
}

#[tokio::test]
async fn what_if_clamps_and_validates_parameters() {
    let app = router();
    upload(&app, sample_rows()).await;

    let (status, result) = get(
        &app,
        "/api/inventory/what-if?categoria=Tools&porcentaje_reduccion=150",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["porcentaje_reduccion"], 100.0);
    assert_eq!(result["capital_liberado"], 400.0);

    let (status, _) = get(
        &app,
        "/api/inventory/what-if?categoria=Tools&porcentaje_reduccion=20&top_n=0",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/api/inventory/what-if?categoria=Tools").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn what_if_unknown_category_is_zero_impact() {
    let app = router();
    upload(&app, sample_rows()).await;

    let (status, result) = get(
        &app,
        "/api/inventory/what-if?categoria=Garden&porcentaje_reduccion=50",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["capital_liberado"], 0.0);
    assert_eq!(result["mensaje"], "Categoria no encontrada en el inventario.");
}

// =============================================================================
// Summary
// =============================================================================

#[tokio::test]
async fn summary_is_missing_before_first_upload() {
    let app = router();
    let (status, body) = get(&app, "/api/inventory/summary").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SUMMARY_NOT_FOUND");
}

#[tokio::test]
async fn upload_publishes_summary_to_reports_directory() {
    let dir = TempDir::new().unwrap();
    let sink = Arc::new(FileSummarySink::new(dir.path()));
    let app = router_with_sink(sink.clone());

    let (_, uploaded) = upload(&app, sample_rows()).await;
    let (status, summary) = get(&app, "/api/inventory/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["dataset_id"], uploaded["dataset_id"]);
    assert_eq!(summary["rows"], 4);
    assert!(sink.summary_path().exists());
    assert!(sink.run_path().exists());
}
