//! Engine error types.

use thiserror::Error;

use rostersync_connector::ConnectorError;
use rostersync_core::{GroupId, Login};

/// Errors that can occur while building a change plan.
///
/// Plan construction is all-or-nothing: any of these aborts the run and
/// no partial plan is returned.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The directory snapshot for a login could not be fetched.
    #[error("directory lookup failed for login '{login}'")]
    Lookup {
        login: Login,
        #[source]
        source: ConnectorError,
    },

    /// A group existence check could not be evaluated. Creating a group
    /// that already exists is rejected by the directory, so the engine
    /// refuses to guess either way.
    #[error("group existence check failed for '{group}'")]
    GroupExistenceCheck {
        group: GroupId,
        #[source]
        source: ConnectorError,
    },
}

/// Type alias for results of engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
