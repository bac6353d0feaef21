//! Revisões de Work Items como retornadas pelo backend
//!
//! O backend repassa o formato do Azure DevOps: os campos ficam em `fields`
//! com nomes de referência (`System.ChangedDate`, `System.State`,
//! `System.AssignedTo`). Todos os campos são opcionais; a validação fica com
//! quem consome as revisões.

use serde::{Deserialize, Serialize};

/// Resposta de `GET /timesheet/work-item/{id}/revisions`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkItemRevisionsResponse {
    #[serde(default)]
    pub work_item_id: Option<u64>,

    #[serde(default)]
    pub revisions: Vec<WorkItemRevisionDto>,
}

/// Uma revisão (snapshot) de um Work Item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkItemRevisionDto {
    /// Número da revisão no Azure DevOps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<u32>,

    #[serde(default)]
    pub fields: RevisionFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RevisionFields {
    /// Timestamp ISO-8601 da alteração
    #[serde(rename = "System.ChangedDate", default, skip_serializing_if = "Option::is_none")]
    pub changed_date: Option<String>,

    #[serde(rename = "System.State", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(rename = "System.AssignedTo", default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<IdentityRef>,
}

/// Referência de identidade do Azure DevOps
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdentityRef {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(rename = "uniqueName", default, skip_serializing_if = "Option::is_none")]
    pub unique_name: Option<String>,
}

impl WorkItemRevisionDto {
    /// ID do responsável nesta revisão
    pub fn assigned_to_id(&self) -> Option<&str> {
        self.fields
            .assigned_to
            .as_ref()
            .and_then(|identity| identity.id.as_deref())
    }
}
