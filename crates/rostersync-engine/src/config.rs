//! Engine configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use rostersync_core::{GroupId, UserAttribute};

/// Configuration for a reconciliation run.
///
/// Everything the engine needs beyond its inputs is passed in here;
/// there is no ambient or process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Attributes to compare, in assignment order.
    #[serde(default = "default_tracked_attributes")]
    pub tracked_attributes: Vec<UserAttribute>,
    /// Groups implicitly granted to every imported user. Membership in
    /// these groups never produces a delta.
    #[serde(default = "default_groups")]
    pub default_groups: BTreeSet<GroupId>,
}

fn default_tracked_attributes() -> Vec<UserAttribute> {
    UserAttribute::ALL.to_vec()
}

fn default_groups() -> BTreeSet<GroupId> {
    BTreeSet::from([GroupId::new("users")])
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            tracked_attributes: default_tracked_attributes(),
            default_groups: default_groups(),
        }
    }
}

impl ReconcileConfig {
    /// Replace the default group set.
    #[must_use]
    pub fn with_default_groups(mut self, groups: impl IntoIterator<Item = GroupId>) -> Self {
        self.default_groups = groups.into_iter().collect();
        self
    }
}
