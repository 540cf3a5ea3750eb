use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::info;

use crate::{
    domain::models::{Issue, Team},
    infrastructure::{linear::GraphqlRequest, state::AppState},
};

use super::errors::ServiceError;

const TEAMS_QUERY: &str = r#"
query {
    teams {
        nodes {
            id
            name
        }
    }
}
"#;

const ISSUE_CREATE_MUTATION: &str = r#"
mutation CreateIssue($teamId: String!, $title: String!) {
    issueCreate(input: {
        teamId: $teamId
        title: $title
        labelIds: []
    }) {
        success
        issue {
            id
            identifier
            title
        }
    }
}
"#;

/// Service creating the placeholder journal issue for the current day.
pub struct JournalService {
    state: Arc<AppState>,
}

impl JournalService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Files today's trading journal issue under the workspace's first team.
    ///
    /// Both network steps are attempted exactly once; re-invoking on the
    /// same date files a duplicate with the same title.
    pub async fn create_daily_entry(&self) -> Result<Issue, ServiceError> {
        if self.state.config.linear.api_key.trim().is_empty() {
            return Err(ServiceError::MissingConfig("LINEAR_API_KEY"));
        }

        let team = self.first_team().await?;
        let title = daily_title(Local::now().date_naive());
        let issue = self.create_issue(&team, &title).await?;

        info!(identifier = %issue.identifier, team = %team.name, "daily journal issue created");
        Ok(issue)
    }

    async fn first_team(&self) -> Result<Team, ServiceError> {
        let response = self
            .state
            .linear
            .execute(GraphqlRequest::query(TEAMS_QUERY))
            .await
            .map_err(|err| ServiceError::TeamLookup(err.to_string()))?;

        let envelope: TeamsEnvelope = serde_json::from_value(response)
            .map_err(|err| ServiceError::TeamLookup(err.to_string()))?;

        // Missing or null keys read as an empty list rather than a parse
        // failure; ordering is Linear's, so the head is deterministic.
        let mut teams = envelope
            .data
            .and_then(|data| data.teams)
            .map(|connection| connection.nodes)
            .unwrap_or_default();

        if teams.is_empty() {
            return Err(ServiceError::NoTeams);
        }
        Ok(teams.remove(0))
    }

    async fn create_issue(&self, team: &Team, title: &str) -> Result<Issue, ServiceError> {
        let request = GraphqlRequest::with_variables(
            ISSUE_CREATE_MUTATION,
            serde_json::json!({ "teamId": team.id, "title": title }),
        );

        let response = self
            .state
            .linear
            .execute(request)
            .await
            .map_err(|err| ServiceError::IssueCreate(err.to_string()))?;

        let envelope: IssueCreateEnvelope =
            serde_json::from_value(response.clone()).unwrap_or_default();

        match envelope.data.and_then(|data| data.issue_create) {
            Some(IssueCreatePayload {
                success: true,
                issue: Some(issue),
            }) => Ok(issue),
            _ => Err(ServiceError::IssueRejected { details: response }),
        }
    }
}

pub fn daily_title(date: NaiveDate) -> String {
    format!("Trading Journal - {}", date.format("%Y-%m-%d"))
}

#[derive(Debug, Default, Deserialize)]
struct TeamsEnvelope {
    #[serde(default)]
    data: Option<TeamsData>,
}

#[derive(Debug, Deserialize)]
struct TeamsData {
    #[serde(default)]
    teams: Option<TeamConnection>,
}

#[derive(Debug, Deserialize)]
struct TeamConnection {
    #[serde(default)]
    nodes: Vec<Team>,
}

#[derive(Debug, Default, Deserialize)]
struct IssueCreateEnvelope {
    #[serde(default)]
    data: Option<IssueCreateData>,
}

#[derive(Debug, Deserialize)]
struct IssueCreateData {
    #[serde(default, rename = "issueCreate")]
    issue_create: Option<IssueCreatePayload>,
}

#[derive(Debug, Deserialize)]
struct IssueCreatePayload {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    issue: Option<Issue>,
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Local;
    use serde_json::{json, Value};

    use crate::infrastructure::{
        config::{AppConfig, Config, LinearConfig, MonitorConfig},
        linear::LinearGateway,
    };

    use super::*;

    struct ScriptedGateway {
        responses: Mutex<VecDeque<Value>>,
        requests: Mutex<Vec<GraphqlRequest>>,
    }

    impl ScriptedGateway {
        fn new(responses: Vec<Value>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn recorded(&self) -> Vec<GraphqlRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LinearGateway for ScriptedGateway {
        async fn execute(&self, request: GraphqlRequest) -> anyhow::Result<Value> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no scripted response left"))
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl LinearGateway for FailingGateway {
        async fn execute(&self, _request: GraphqlRequest) -> anyhow::Result<Value> {
            Err(anyhow::anyhow!("connection reset by peer"))
        }
    }

    fn service_with(gateway: Arc<dyn LinearGateway>, api_key: &str) -> JournalService {
        let config = Config {
            app: AppConfig::default(),
            linear: LinearConfig {
                api_key: api_key.to_string(),
                ..LinearConfig::default()
            },
            monitor: MonitorConfig::default(),
        };
        JournalService::new(Arc::new(AppState::new(Arc::new(config), gateway)))
    }

    fn teams_response(nodes: Value) -> Value {
        json!({ "data": { "teams": { "nodes": nodes } } })
    }

    #[test]
    fn daily_title_matches_the_journal_format() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();

        assert_eq!(daily_title(date), "Trading Journal - 2024-01-09");
    }

    #[tokio::test]
    async fn missing_api_key_short_circuits() {
        let gateway = ScriptedGateway::new(Vec::new());
        let service = service_with(gateway.clone(), "");

        let err = service.create_daily_entry().await.unwrap_err();

        assert!(matches!(err, ServiceError::MissingConfig("LINEAR_API_KEY")));
        assert!(gateway.recorded().is_empty());
    }

    #[tokio::test]
    async fn empty_team_list_is_not_found() {
        let gateway = ScriptedGateway::new(vec![teams_response(json!([]))]);
        let service = service_with(gateway, "lin_api_test");

        let err = service.create_daily_entry().await.unwrap_err();

        assert!(matches!(err, ServiceError::NoTeams));
        assert_eq!(err.to_string(), "No teams found");
    }

    #[tokio::test]
    async fn missing_data_key_reads_as_no_teams() {
        let gateway = ScriptedGateway::new(vec![json!({ "data": null })]);
        let service = service_with(gateway, "lin_api_test");

        let err = service.create_daily_entry().await.unwrap_err();

        assert!(matches!(err, ServiceError::NoTeams));
    }

    #[tokio::test]
    async fn files_the_issue_under_the_first_team() {
        let title = daily_title(Local::now().date_naive());
        let gateway = ScriptedGateway::new(vec![
            teams_response(json!([
                { "id": "team-1", "name": "Trading" },
                { "id": "team-2", "name": "Research" }
            ])),
            json!({ "data": { "issueCreate": { "success": true, "issue": {
                "id": "issue-1", "identifier": "TRD-42", "title": title.clone()
            } } } }),
        ]);
        let service = service_with(gateway.clone(), "lin_api_test");

        let issue = service.create_daily_entry().await.unwrap();

        assert_eq!(issue.identifier, "TRD-42");
        assert_eq!(issue.title, title);

        let requests = gateway.recorded();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].query.contains("teams"));
        assert!(requests[1].query.contains("issueCreate"));
        let variables = requests[1].variables.as_ref().unwrap();
        assert_eq!(variables["teamId"], "team-1");
        assert_eq!(variables["title"], Value::String(title));
    }

    #[tokio::test]
    async fn rejected_mutation_surfaces_raw_details() {
        let rejection = json!({ "data": { "issueCreate": { "success": false } } });
        let gateway = ScriptedGateway::new(vec![
            teams_response(json!([{ "id": "team-1", "name": "Trading" }])),
            rejection.clone(),
        ]);
        let service = service_with(gateway, "lin_api_test");

        let err = service.create_daily_entry().await.unwrap_err();

        match err {
            ServiceError::IssueRejected { details } => assert_eq!(details, rejection),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_without_an_issue_is_still_rejected() {
        let gateway = ScriptedGateway::new(vec![
            teams_response(json!([{ "id": "team-1", "name": "Trading" }])),
            json!({ "data": { "issueCreate": { "success": true } } }),
        ]);
        let service = service_with(gateway, "lin_api_test");

        let err = service.create_daily_entry().await.unwrap_err();

        assert!(matches!(err, ServiceError::IssueRejected { .. }));
    }

    #[tokio::test]
    async fn transport_failure_is_translated() {
        let service = service_with(Arc::new(FailingGateway), "lin_api_test");

        let err = service.create_daily_entry().await.unwrap_err();

        assert!(err.to_string().contains("Failed to fetch teams"));
        assert!(err.to_string().contains("connection reset by peer"));
    }
}
