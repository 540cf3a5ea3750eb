use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::infrastructure::config::LinearConfig;

/// A single GraphQL document plus its variables, serialized as the
/// `{"query", "variables"?}` body Linear expects.
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl GraphqlRequest {
    pub fn query(document: &str) -> Self {
        Self {
            query: document.to_string(),
            variables: None,
        }
    }

    pub fn with_variables(document: &str, variables: Value) -> Self {
        Self {
            query: document.to_string(),
            variables: Some(variables),
        }
    }
}

/// Outbound capability to the Linear GraphQL API. Tests substitute this
/// with scripted implementations instead of intercepting the transport.
#[async_trait]
pub trait LinearGateway: Send + Sync {
    async fn execute(&self, request: GraphqlRequest) -> anyhow::Result<Value>;
}

pub fn build_gateway(config: &LinearConfig) -> anyhow::Result<Arc<dyn LinearGateway>> {
    Ok(Arc::new(HttpLinearGateway::new(config)?))
}

struct HttpLinearGateway {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl HttpLinearGateway {
    fn new(config: &LinearConfig) -> anyhow::Result<Self> {
        let endpoint = Url::parse(&config.api_url)
            .with_context(|| format!("invalid Linear API URL: {}", config.api_url))?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("failed to build Linear HTTP client")?;
        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl LinearGateway for HttpLinearGateway {
    async fn execute(&self, request: GraphqlRequest) -> anyhow::Result<Value> {
        // Linear personal API keys go in Authorization without a Bearer prefix.
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::AUTHORIZATION, self.api_key.as_str())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
