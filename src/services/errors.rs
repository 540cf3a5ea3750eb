use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not configured")]
    MissingConfig(&'static str),
    #[error("Failed to fetch teams: {0}")]
    TeamLookup(String),
    #[error("No teams found")]
    NoTeams,
    #[error("Failed to create issue: {0}")]
    IssueCreate(String),
    #[error("Failed to create issue")]
    IssueRejected { details: serde_json::Value },
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::MissingConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::TeamLookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::NoTeams => StatusCode::NOT_FOUND,
            ServiceError::IssueCreate(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::IssueRejected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body for the error, keeping the raw Linear reply attached
    /// when the mutation was rejected.
    pub fn into_payload(self) -> serde_json::Value {
        let message = self.to_string();
        match self {
            ServiceError::IssueRejected { details } => {
                serde_json::json!({ "error": message, "details": details })
            }
            _ => serde_json::json!({ "error": message }),
        }
    }
}
