use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    /// The request was refused; the session carries on.
    #[error("{0}")]
    Declined(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::Declined(_))
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(_) | DomainError::Parse(_) | DomainError::NotFound(_) => {
                AppError::Declined(e.to_string())
            }
            DomainError::PersistenceCorrupt(_) | DomainError::Internal(_) => {
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}
