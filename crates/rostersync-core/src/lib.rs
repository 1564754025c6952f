//! rostersync Core Library
//!
//! Shared types and pure logic for reconciling an HR roster export
//! against an identity directory.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (`Login`, `GroupId`)
//! - [`record`] - Import and directory record types
//! - [`normalize`] - Group label canonicalization
//! - [`catalog`] - Canonical group id to human label mapping
//! - [`batch`] - Import batch assembly and validation
//! - [`error`] - Batch validation errors (`BatchError`)
//!
//! # Example
//!
//! ```
//! use rostersync_core::{ImportBatch, RawImportRow};
//!
//! let rows = vec![RawImportRow::new(2, "jdoe")
//!     .with_first_name("Jane")
//!     .with_last_name("Doe")
//!     .with_groups("Büro/Team")];
//!
//! let batch = ImportBatch::from_rows(rows, '/').unwrap();
//! assert_eq!(batch.len(), 1);
//! assert_eq!(batch.catalog().description("buero"), Some("Büro"));
//! ```

pub mod batch;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod normalize;
pub mod record;

// Re-export main types for convenient access
pub use batch::{ImportBatch, RawImportRow};
pub use catalog::GroupCatalog;
pub use error::{BatchError, Result};
pub use ids::{GroupId, Login};
pub use normalize::normalize_group_field;
pub use record::{
    AttributeAssignment, DirectoryEntry, DirectoryUser, ImportRecord, UserAttribute,
};
