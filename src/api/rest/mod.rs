use axum::{routing::get, Router};

use crate::api::rest::{journal::router as journal_router, monitor::router as monitor_router};

pub mod health;
pub mod journal;
pub mod monitor;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health::healthcheck))
        .nest("/journal", journal_router())
        .nest("/monitor", monitor_router())
}
