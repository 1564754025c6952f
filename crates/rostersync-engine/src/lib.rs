//! # Reconciliation Engine
//!
//! Computes the minimal, correctly-ordered set of directory mutations
//! needed to bring an identity directory into agreement with an
//! authoritative roster export.
//!
//! ```text
//! ImportBatch ──► DiffEngine ──► UserDelta* ──► ChangePlan ──► commands()
//!                     ▲                             ▲
//!              DirectoryEntry                  group resolver
//!              (SnapshotOp)                    (GroupQueryOp)
//! ```
//!
//! The engine never mutates anything itself: it produces a [`ChangePlan`]
//! whose five categories must be executed in their fixed order
//! (`user-add`, `user-mod`, `group-add`, `group-add-member`,
//! `group-remove-member`), because later categories reference entities
//! created by earlier ones. It never deletes users; it only adds,
//! modifies, and adjusts group membership.
//!
//! ## Usage
//!
//! ```ignore
//! use rostersync_engine::{ReconcileConfig, Reconciler};
//!
//! let reconciler = Reconciler::new(&directory);
//! let plan = reconciler.reconcile(&batch).await?;
//! if plan.is_empty() {
//!     println!("No changes.");
//! }
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod plan;
pub mod reconciler;
pub mod resolver;

pub use config::ReconcileConfig;
pub use diff::{DiffEngine, UserChange, UserDelta};
pub use error::{EngineError, EngineResult};
pub use plan::{ChangePlan, PlanSummary};
pub use reconciler::Reconciler;
pub use resolver::resolve_group_additions;
