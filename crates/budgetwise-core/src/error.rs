use thiserror::Error;

use crate::validation::ValidationErrors;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl CoreError {
    pub fn poisoned() -> Self {
        CoreError::Storage("store lock poisoned".into())
    }
}
