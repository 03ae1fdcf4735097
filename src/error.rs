use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("File error: {path:?} - {message}")]
    FileError {
        path: PathBuf,
        message: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Command failed: {command} exited with {status} - {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to start command: {command} - {message}")]
    CommandSpawn {
        command: String,
        message: String,
    },

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl From<anyhow::Error> for FlowError {
    fn from(error: anyhow::Error) -> Self {
        FlowError::UnexpectedError(error.to_string())
    }
}

pub type FlowResult<T> = std::result::Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message() {
        let error = FlowError::CommandFailed {
            command: "false".to_string(),
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        };

        assert_eq!(error.to_string(), "Command failed: false exited with exit status: 1 - ");
    }

    #[test]
    fn test_from_anyhow() {
        let error: FlowError = anyhow::anyhow!("boom").into();
        assert!(matches!(error, FlowError::UnexpectedError(ref m) if m == "boom"));
    }
}
