//! Reconciliation orchestrator.
//!
//! Joins the import batch to directory snapshots by login, runs the
//! difference engine per record, and assembles the final change plan.

use rostersync_connector::{GroupQueryOp, SnapshotOp};
use rostersync_core::ImportBatch;

use crate::config::ReconcileConfig;
use crate::diff::DiffEngine;
use crate::error::{EngineError, EngineResult};
use crate::plan::ChangePlan;
use crate::resolver::resolve_group_additions;

/// Drives one reconciliation run against a directory.
pub struct Reconciler<'a, D: ?Sized> {
    directory: &'a D,
    config: ReconcileConfig,
}

impl<'a, D> Reconciler<'a, D>
where
    D: SnapshotOp + GroupQueryOp + ?Sized,
{
    /// Create a reconciler with the default configuration.
    pub fn new(directory: &'a D) -> Self {
        Self {
            directory,
            config: ReconcileConfig::default(),
        }
    }

    /// Create a reconciler with a custom configuration.
    pub fn with_config(directory: &'a D, config: ReconcileConfig) -> Self {
        Self { directory, config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Build the change plan for one import batch.
    ///
    /// Records are processed in batch order; each is paired with the
    /// directory entry fetched for its own login, never by position.
    /// Construction is all-or-nothing: the first connector failure
    /// aborts the run without a plan.
    pub async fn reconcile(&self, batch: &ImportBatch) -> EngineResult<ChangePlan> {
        let diff_engine = DiffEngine::new(&self.config);
        let mut plan = ChangePlan::default();

        for record in batch.records() {
            let entry = self
                .directory
                .lookup_user(&record.login)
                .await
                .map_err(|source| EngineError::Lookup {
                    login: record.login.clone(),
                    source,
                })?;

            let delta = diff_engine.diff(record, &entry);
            if !delta.is_empty() {
                tracing::debug!(
                    login = %record.login,
                    groups_to_add = delta.groups_to_add.len(),
                    groups_to_remove = delta.groups_to_remove.len(),
                    "Computed user delta"
                );
            }
            plan.merge_delta(delta);
        }

        plan.group_add = resolve_group_additions(&plan, batch.catalog(), self.directory).await?;

        let summary = plan.summary();
        tracing::info!(
            users_added = summary.users_added,
            users_modified = summary.users_modified,
            groups_added = summary.groups_added,
            groups_gaining_members = summary.groups_gaining_members,
            groups_losing_members = summary.groups_losing_members,
            "Change plan assembled"
        );

        Ok(plan)
    }
}
