//! Revisões de Work Items
//!
//! `GET /timesheet/work-item/{id}/revisions?organization_name=&project_id=`
//!
//! A ordem das revisões retornadas não é garantida. Um Work Item recém-criado
//! pode não ter revisões.

use crate::client::TimesheetClient;
use crate::error::Result;
use crate::types::{WorkItemRevisionDto, WorkItemRevisionsResponse};

impl TimesheetClient {
    /// Busca o histórico de revisões de um Work Item
    pub async fn fetch_revisions(
        &self,
        work_item_id: u64,
        organization: &str,
        project: &str,
    ) -> Result<Vec<WorkItemRevisionDto>> {
        let endpoint = format!("/timesheet/work-item/{}/revisions", work_item_id);
        let query = [("organization_name", organization), ("project_id", project)];

        let response: Option<WorkItemRevisionsResponse> = self.get_json(&endpoint, &query).await?;
        let revisions = response.map(|r| r.revisions).unwrap_or_default();

        tracing::debug!(
            "Work item {}: {} revisões recebidas",
            work_item_id,
            revisions.len()
        );

        Ok(revisions)
    }
}
