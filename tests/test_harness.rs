use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::Request,
    response::Response,
    Extension, Router,
};
use serde_json::Value;
use trading_ops::{
    api,
    infrastructure::{
        config::{AppConfig, Config, LinearConfig, MonitorConfig},
        linear,
        state::AppState,
    },
};

pub fn test_config(api_url: &str, api_key: &str, project_id: &str) -> Arc<Config> {
    Arc::new(Config {
        app: AppConfig::default(),
        linear: LinearConfig {
            api_key: api_key.to_string(),
            api_url: api_url.to_string(),
            request_timeout_seconds: 5,
        },
        monitor: MonitorConfig {
            project_id: project_id.to_string(),
        },
    })
}

pub fn build_app(config: Arc<Config>) -> anyhow::Result<Router> {
    let gateway = linear::build_gateway(&config.linear)?;
    let state = Arc::new(AppState::new(Arc::clone(&config), gateway));
    Ok(api::build_router(Arc::clone(&config)).layer(Extension(state)))
}

pub fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn read_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&body).expect("response body is not json")
}
