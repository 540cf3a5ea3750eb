use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{error, info};

use crate::infrastructure::state::AppState;

use super::errors::ServiceError;

/// Outcome of a single monitoring pass.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorReport {
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// Stub for the BigQuery job monitor.
///
/// Checks the wiring the real monitor will need and reports a completed
/// pass without touching BigQuery yet.
pub struct MonitorService {
    state: Arc<AppState>,
}

impl MonitorService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn check_jobs(&self) -> Result<MonitorReport, ServiceError> {
        info!("starting BigQuery job monitoring");

        if self.state.config.linear.api_key.trim().is_empty() {
            error!("LINEAR_API_KEY not configured");
            return Err(ServiceError::MissingConfig("LINEAR_API_KEY"));
        }

        let project_id = self.state.config.monitor.project_id.trim();
        if project_id.is_empty() {
            error!("GCP_PROJECT_ID not configured");
            return Err(ServiceError::MissingConfig("GCP_PROJECT_ID"));
        }

        // TODO: query the BigQuery jobs API and open Linear issues for failed jobs.
        info!(project_id, "monitoring BigQuery jobs");

        Ok(MonitorReport {
            message: format!("BigQuery monitoring check completed for project {project_id}"),
            timestamp: Local::now(),
        })
    }
}
