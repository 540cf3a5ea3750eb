use std::sync::Arc;

use axum::{extract::Extension, routing::post, Json, Router};

use crate::{
    infrastructure::state::AppState, services::errors::ServiceError,
    services::monitor::MonitorService,
};

pub fn router() -> Router {
    Router::new().route("/bigquery", post(check_bigquery_jobs))
}

async fn check_bigquery_jobs(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let service = MonitorService::new(state);
    let report = service.check_jobs().await.map_err(to_response)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": report.message,
        "timestamp": report.timestamp,
    })))
}

fn to_response(err: ServiceError) -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (err.status_code(), Json(err.into_payload()))
}
