//! Tipos de resposta da API de timesheet

pub mod process_state;
pub mod revision;

pub use process_state::ProcessStateMappingResponse;
pub use revision::{IdentityRef, RevisionFields, WorkItemRevisionDto, WorkItemRevisionsResponse};
