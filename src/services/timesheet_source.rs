//! Fonte das entradas do avaliador (revisões e mapeamento de estados)
//!
//! Em produção é o `TimesheetClient`; nos testes, uma implementação em memória.

use crate::models::{StateCategoryMap, WorkItemRevision};
use crate::utils::logging::{log_revisions_fetched, log_state_map_fetched, log_timesheet_api_error};
use crate::utils::AppResult;
use std::future::Future;
use timesheet_api::TimesheetClient;

pub trait TimesheetSource: Send + Sync {
    fn fetch_revisions(
        &self,
        work_item_id: u64,
        organization: &str,
        project: &str,
    ) -> impl Future<Output = AppResult<Vec<WorkItemRevision>>> + Send;

    fn fetch_state_category_map(
        &self,
        organization: &str,
        project: &str,
        process_id: &str,
        work_item_type: &str,
    ) -> impl Future<Output = AppResult<StateCategoryMap>> + Send;
}

impl TimesheetSource for TimesheetClient {
    async fn fetch_revisions(
        &self,
        work_item_id: u64,
        organization: &str,
        project: &str,
    ) -> AppResult<Vec<WorkItemRevision>> {
        let revisions = TimesheetClient::fetch_revisions(self, work_item_id, organization, project)
            .await
            .map_err(|e| {
                log_timesheet_api_error("work-item/revisions", e.status(), &e.to_string());
                e
            })?;

        log_revisions_fetched(work_item_id, revisions.len());

        Ok(revisions.iter().map(WorkItemRevision::from).collect())
    }

    async fn fetch_state_category_map(
        &self,
        organization: &str,
        project: &str,
        process_id: &str,
        work_item_type: &str,
    ) -> AppResult<StateCategoryMap> {
        let raw = TimesheetClient::fetch_state_category_map(self, organization, project, process_id, work_item_type)
            .await
            .map_err(|e| {
                log_timesheet_api_error("process-states", e.status(), &e.to_string());
                e
            })?;

        log_state_map_fetched(organization, process_id, work_item_type, raw.len());

        Ok(StateCategoryMap::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::AppError;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::sync::Arc;
    use timesheet_api::StaticToken;

    fn client(server: &MockServer) -> TimesheetClient {
        TimesheetClient::new(&server.base_url(), Arc::new(StaticToken::new("pat"))).unwrap()
    }

    #[tokio::test]
    async fn test_client_revisions_become_models() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/timesheet/work-item/42/revisions");
                then.status(200).json_body(json!({
                    "revisions": [{
                        "rev": 1,
                        "fields": {
                            "System.ChangedDate": "2025-01-19T10:00:00Z",
                            "System.State": "Active",
                            "System.AssignedTo": { "id": "u1" }
                        }
                    }]
                }));
            })
            .await;

        let revisions = TimesheetSource::fetch_revisions(&client(&server), 42, "contoso", "proj-1")
            .await
            .unwrap();

        assert_eq!(revisions.len(), 1);
        assert_eq!(revisions[0].state.as_deref(), Some("Active"));
        assert_eq!(revisions[0].assigned_to_id.as_deref(), Some("u1"));
        assert!(revisions[0].changed_date.is_some());
    }

    #[tokio::test]
    async fn test_client_state_map_becomes_model() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/timesheet/process-states");
                then.status(200).json_body(json!({ "state_map": { "Active": "InProgress" } }));
            })
            .await;

        let map = TimesheetSource::fetch_state_category_map(&client(&server), "contoso", "proj-1", "agile", "Task")
            .await
            .unwrap();

        assert!(map.is_in_progress("Active"));
    }

    #[tokio::test]
    async fn test_client_error_becomes_app_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/timesheet/process-states");
                then.status(403).json_body(json!({ "detail": "PAT sem permissão" }));
            })
            .await;

        let result = TimesheetSource::fetch_state_category_map(&client(&server), "contoso", "proj-1", "agile", "Task").await;

        match result {
            Err(err @ AppError::TimesheetApi(_)) => assert_eq!(err.status(), Some(403)),
            other => panic!("esperava TimesheetApi, obteve {:?}", other),
        }
    }
}
