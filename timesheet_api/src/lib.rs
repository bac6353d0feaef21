//! Cliente da API de timesheet do Aponta
//!
//! Cobre apenas as leituras usadas pelo destaque de células azuis:
//!
//! - **Revisões**: `/timesheet/work-item/{id}/revisions`
//! - **Estados do processo**: `/timesheet/process-states`
//!
//! # Autenticação
//!
//! Bearer token fornecido por um [`TokenProvider`]. Em um 401 o cliente pede
//! um token renovado e repete a requisição uma vez.
//!
//! # Exemplo Básico
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use timesheet_api::{StaticToken, TimesheetClient};
//!
//! #[tokio::main]
//! async fn main() -> timesheet_api::Result<()> {
//!     let token = std::env::var("APONTA_API_TOKEN").unwrap_or_default();
//!     let client = TimesheetClient::new("https://api.aponta.app", Arc::new(StaticToken::new(token)))?;
//!
//!     let revisions = client.fetch_revisions(42, "contoso", "proj-1").await?;
//!     println!("{} revisões", revisions.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod process_states;
pub mod revisions;
pub mod types;

pub use auth::{StaticToken, TokenProvider};
pub use client::{normalize_base_url, TimesheetClient};
pub use error::{Result, TimesheetApiError};
