//! Mapeamento estado -> categoria de um tipo de Work Item

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resposta de `GET /timesheet/process-states`
///
/// Exemplo: `{"state_map": {"New": "Proposed", "Active": "InProgress"}}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessStateMappingResponse {
    #[serde(default)]
    pub state_map: HashMap<String, String>,
}
