//! # FreeIPA Connector
//!
//! Directory adapter that drives the FreeIPA command-line tool.
//!
//! Every operation is one `ipa` invocation: `user-show --all` for
//! snapshots, `group-show` for existence checks, and the five mutation
//! verbs for plan execution. The adapter owns the process boundary;
//! nothing else in rostersync spawns processes.
//!
//! ## Example
//!
//! ```ignore
//! use rostersync_connector::prelude::*;
//! use rostersync_connector_ipa::{IpaConfig, IpaConnector};
//!
//! let connector = IpaConnector::new(IpaConfig::default());
//! connector.test_connection().await?;
//!
//! let entry = connector.lookup_user(&Login::new("jdoe")).await?;
//! ```

pub mod config;
pub mod connector;
mod output;

// Re-exports
pub use config::IpaConfig;
pub use connector::IpaConnector;
