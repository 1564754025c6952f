//! # Directory Connector Framework
//!
//! Boundary contracts between the reconciliation engine and a real
//! identity directory.
//!
//! The engine is a pure computation; everything that crosses a process
//! or network boundary lives behind the capability traits defined here:
//!
//! - [`Directory`] - Base trait all directory adapters implement
//! - [`SnapshotOp`] - Fetch the current record for a login
//! - [`GroupQueryOp`] - Check whether a group exists
//! - [`ApplyOp`] - Execute one [`DirectoryCommand`]
//!
//! ## Example
//!
//! ```ignore
//! use rostersync_connector::prelude::*;
//!
//! async fn probe(directory: &impl SnapshotOp) -> ConnectorResult<()> {
//!     let entry = directory.lookup_user(&Login::new("jdoe")).await?;
//!     if entry.is_present() {
//!         println!("jdoe exists");
//!     }
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod error;
pub mod traits;

pub use command::DirectoryCommand;
pub use error::{ConnectorError, ConnectorResult};
pub use traits::{ApplyOp, Directory, FullDirectory, GroupQueryOp, SnapshotOp};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::command::DirectoryCommand;
    pub use crate::error::{ConnectorError, ConnectorResult};
    pub use crate::traits::{ApplyOp, Directory, FullDirectory, GroupQueryOp, SnapshotOp};
    pub use rostersync_core::{DirectoryEntry, DirectoryUser, GroupId, Login};
}
