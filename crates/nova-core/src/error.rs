use thiserror::Error;
use uuid::Uuid;

use nova_domain::TransactionValidationError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("No profile is signed in")]
    NoActiveSession,
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TransactionValidationError> for CoreError {
    fn from(err: TransactionValidationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
