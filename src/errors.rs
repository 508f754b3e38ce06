use nova_config::ConfigError;
use nova_core::CoreError;
use thiserror::Error;

/// Unified error type for core, storage and config layers.
#[derive(Error, Debug)]
pub enum NovaError {
    #[error("No profile is signed in")]
    NotSignedIn,
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] NovaError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CoreError> for NovaError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoActiveSession => NovaError::NotSignedIn,
            CoreError::ProfileNotFound(name) => NovaError::ProfileNotFound(name),
            CoreError::TransactionNotFound(id) => NovaError::TransactionNotFound(id.to_string()),
            CoreError::Validation(message) => NovaError::InvalidInput(message),
            CoreError::Storage(message) | CoreError::Serde(message) => {
                NovaError::StorageError(message)
            }
            CoreError::Io(err) => NovaError::StorageError(err.to_string()),
        }
    }
}

impl From<ConfigError> for NovaError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => NovaError::StorageError(io.to_string()),
            ConfigError::Serde(message) | ConfigError::Invalid(message) => {
                NovaError::ConfigError(message)
            }
            err @ ConfigError::BackupNotFound(_) => NovaError::ConfigError(err.to_string()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(NovaError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(NovaError::from(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}
