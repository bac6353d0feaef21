//! Tipos de erro para o crate timesheet_api

use thiserror::Error;

/// Erros do cliente da API de timesheet
#[derive(Debug, Error)]
pub enum TimesheetApiError {
    /// Erro de requisição HTTP (rede, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Erro da API (status code não-2xx)
    #[error("Timesheet API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// 401 persistente mesmo após renovar o token
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Erro de parsing JSON
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Erro de configuração
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TimesheetApiError {
    /// Status HTTP associado ao erro, quando houver
    pub fn status(&self) -> Option<u16> {
        match self {
            TimesheetApiError::ApiError { status, .. } => Some(*status),
            TimesheetApiError::AuthError(_) => Some(401),
            TimesheetApiError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, TimesheetApiError>;
