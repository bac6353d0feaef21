use std::fmt;
use timesheet_api::TimesheetApiError;

#[derive(Debug)]
pub enum AppError {
    TimesheetApi(TimesheetApiError),
    ConfigError(String),
    ValidationError(String),
    InternalError(String),
}

impl AppError {
    /// Status HTTP de origem, quando o erro veio do backend
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::TimesheetApi(err) => err.status(),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::TimesheetApi(err) => write!(f, "Timesheet API error: {}", err),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::TimesheetApi(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TimesheetApiError> for AppError {
    fn from(err: TimesheetApiError) -> Self {
        AppError::TimesheetApi(err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
