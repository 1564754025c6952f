//! Connector error types.

use thiserror::Error;

/// Error that can occur while talking to a directory service.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The directory tool could not be launched at all.
    #[error("failed to launch '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A directory command ran but reported failure.
    #[error("command '{command}' failed{}: {stderr}", code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    CommandFailed {
        /// The command and primary key, for context.
        command: String,
        /// Process exit code, if the process exited normally.
        code: Option<i32>,
        /// Captured standard error output, trimmed.
        stderr: String,
    },

    /// The directory tool produced output this adapter cannot interpret.
    #[error("unparseable directory output: {message}")]
    OutputParse { message: String },
}

/// Type alias for results of connector operations.
pub type ConnectorResult<T> = Result<T, ConnectorError>;
