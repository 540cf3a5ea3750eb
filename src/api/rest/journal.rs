use std::sync::Arc;

use axum::{extract::Extension, routing::post, Json, Router};

use crate::{
    infrastructure::state::AppState, services::errors::ServiceError,
    services::journal::JournalService,
};

pub fn router() -> Router {
    Router::new().route("/daily", post(create_daily_entry))
}

async fn create_daily_entry(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let service = JournalService::new(state);
    let issue = service.create_daily_entry().await.map_err(to_response)?;
    Ok(Json(serde_json::json!({ "success": true, "issue": issue })))
}

fn to_response(err: ServiceError) -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (err.status_code(), Json(err.into_payload()))
}
