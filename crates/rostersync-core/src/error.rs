//! Batch validation errors.

use thiserror::Error;

use crate::ids::Login;

/// Errors raised while assembling an import batch.
///
/// The reconciliation engine indexes records by login and assumes the
/// batch is well-formed; these violations must reject the batch before
/// the engine ever sees it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BatchError {
    /// Two roster rows share the same login.
    #[error("duplicate login '{login}' in import batch (row {line})")]
    DuplicateLogin { login: Login, line: usize },

    /// A roster row has no login.
    #[error("row {line}: login is empty")]
    EmptyLogin { line: usize },
}

/// Type alias for results using [`BatchError`].
pub type Result<T> = std::result::Result<T, BatchError>;
