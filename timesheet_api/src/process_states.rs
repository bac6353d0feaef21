//! Mapeamento de estados do processo
//!
//! `GET /timesheet/process-states?organization_name=&project_id=&process_id=&work_item_type=`
//!
//! O mapeamento muda raramente (só quando o processo é customizado), então quem
//! consome costuma guardar o resultado por bastante tempo.

use crate::client::TimesheetClient;
use crate::error::Result;
use crate::types::ProcessStateMappingResponse;
use std::collections::HashMap;

impl TimesheetClient {
    /// Busca o mapeamento estado -> categoria de um tipo de Work Item
    pub async fn fetch_state_category_map(
        &self,
        organization: &str,
        project: &str,
        process_id: &str,
        work_item_type: &str,
    ) -> Result<HashMap<String, String>> {
        let query = [
            ("organization_name", organization),
            ("project_id", project),
            ("process_id", process_id),
            ("work_item_type", work_item_type),
        ];

        let response: Option<ProcessStateMappingResponse> =
            self.get_json("/timesheet/process-states", &query).await?;

        Ok(response.map(|r| r.state_map).unwrap_or_default())
    }
}
