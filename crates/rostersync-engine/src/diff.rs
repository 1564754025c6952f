//! Per-user difference computation.
//!
//! Compares one normalized roster record against the directory's current
//! view of the same login and emits attribute-level and group-membership
//! deltas. Pure and infallible: empty or missing values are valid and
//! simply produce no delta.

use std::collections::BTreeSet;

use rostersync_core::{AttributeAssignment, DirectoryEntry, GroupId, ImportRecord, Login};

use crate::config::ReconcileConfig;

/// The attribute-level change for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserChange {
    /// The login is absent from the directory: create it with one
    /// assignment per tracked attribute, empty values included.
    Add(Vec<AttributeAssignment>),
    /// The login exists: assignments for the attributes that differ.
    Modify(Vec<AttributeAssignment>),
    /// Every tracked attribute already agrees.
    Unchanged,
}

/// The full delta for one user: attribute change plus membership moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDelta {
    pub login: Login,
    pub change: UserChange,
    /// Groups the user must be added to, in canonical id order.
    pub groups_to_add: Vec<GroupId>,
    /// Groups the user must be removed from, in canonical id order.
    pub groups_to_remove: Vec<GroupId>,
}

impl UserDelta {
    /// Check whether this delta carries no work at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.change, UserChange::Unchanged)
            && self.groups_to_add.is_empty()
            && self.groups_to_remove.is_empty()
    }
}

/// Computes [`UserDelta`]s under a fixed configuration.
#[derive(Debug, Clone)]
pub struct DiffEngine<'a> {
    config: &'a ReconcileConfig,
}

impl<'a> DiffEngine<'a> {
    /// Create a diff engine over the given configuration.
    #[must_use]
    pub fn new(config: &'a ReconcileConfig) -> Self {
        Self { config }
    }

    /// Compare one roster record with the directory's entry for the same
    /// login.
    ///
    /// Attribute values are whitespace-trimmed on both sides before the
    /// string comparison; an absent directory record compares as all
    /// empty.
    #[must_use]
    pub fn diff(&self, import: &ImportRecord, entry: &DirectoryEntry) -> UserDelta {
        let change = match entry.user() {
            None => UserChange::Add(
                self.config
                    .tracked_attributes
                    .iter()
                    .map(|&attribute| {
                        AttributeAssignment::new(attribute, import.attribute(attribute).trim())
                    })
                    .collect(),
            ),
            Some(user) => {
                let changed: Vec<AttributeAssignment> = self
                    .config
                    .tracked_attributes
                    .iter()
                    .filter_map(|&attribute| {
                        let new_value = import.attribute(attribute).trim();
                        let old_value = user.attribute(attribute).trim();
                        (new_value != old_value)
                            .then(|| AttributeAssignment::new(attribute, new_value))
                    })
                    .collect();
                if changed.is_empty() {
                    UserChange::Unchanged
                } else {
                    UserChange::Modify(changed)
                }
            }
        };

        let defaults = &self.config.default_groups;
        let import_groups: BTreeSet<&GroupId> =
            import.groups.iter().chain(defaults.iter()).collect();
        let directory_groups: BTreeSet<&GroupId> = entry
            .user()
            .map(|u| u.groups.iter().chain(defaults.iter()).collect())
            .unwrap_or_else(|| defaults.iter().collect());

        let groups_to_add = import_groups
            .difference(&directory_groups)
            .map(|&g| g.clone())
            .collect();
        let groups_to_remove = directory_groups
            .difference(&import_groups)
            .map(|&g| g.clone())
            .collect();

        UserDelta {
            login: import.login.clone(),
            change,
            groups_to_add,
            groups_to_remove,
        }
    }
}
