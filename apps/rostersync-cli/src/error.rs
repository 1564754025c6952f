//! CLI error types and exit codes

use thiserror::Error;

use rostersync_connector::ConnectorError;
use rostersync_core::BatchError;
use rostersync_engine::EngineError;

/// Exit codes for the CLI
/// - 0: Success (including "no changes" and user abort)
/// - 1: General error
/// - 3: Directory unreachable
/// - 4: Validation error (bad CSV, duplicate login)
/// - 5: Plan execution failures
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid roster: {0}")]
    Batch(#[from] BatchError),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Directory error: {0}")]
    Connector(#[from] ConnectorError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input error: {0}")]
    Input(String),

    #[error("{failed} of {total} change(s) failed")]
    ExecutionFailed { failed: usize, total: usize },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation(_) | CliError::Batch(_) => 4,
            CliError::Connector(_) => 3,
            CliError::Engine(EngineError::Lookup { .. })
            | CliError::Engine(EngineError::GroupExistenceCheck { .. }) => 3,
            CliError::ExecutionFailed { .. } => 5,
            CliError::Io(_) | CliError::Json(_) | CliError::Input(_) => 1,
        }
    }

    /// Print the error to stderr with appropriate formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31mError:\x1b[0m {self}");
        } else {
            eprintln!("Error: {self}");
        }

        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rostersync_core::Login;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Validation("x".to_string()).exit_code(), 4);
        assert_eq!(
            CliError::Batch(BatchError::DuplicateLogin {
                login: Login::new("jdoe"),
                line: 3
            })
            .exit_code(),
            4
        );
        assert_eq!(
            CliError::ExecutionFailed {
                failed: 1,
                total: 4
            }
            .exit_code(),
            5
        );
        assert_eq!(CliError::Io("x".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_execution_failed_display() {
        let err = CliError::ExecutionFailed {
            failed: 2,
            total: 7,
        };
        assert_eq!(err.to_string(), "2 of 7 change(s) failed");
    }
}
