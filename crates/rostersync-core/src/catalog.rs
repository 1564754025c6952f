//! Canonical group id to human label mapping.

use std::collections::HashMap;

use crate::ids::GroupId;

/// Maps canonical group identifiers back to the human-readable label they
/// were derived from.
///
/// Built while roster records are normalized; the first label seen for a
/// given id across the batch wins and later occurrences are ignored. Used
/// to attach a description when a referenced group has to be created.
#[derive(Debug, Clone, Default)]
pub struct GroupCatalog {
    entries: HashMap<GroupId, String>,
}

impl GroupCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the original label for a canonical id.
    ///
    /// First occurrence wins; empty labels are never recorded.
    pub fn record(&mut self, id: GroupId, label: impl Into<String>) {
        let label = label.into();
        if label.is_empty() {
            return;
        }
        self.entries.entry(id).or_insert(label);
    }

    /// Look up the original label for a canonical id.
    #[must_use]
    pub fn description(&self, id: impl AsRef<str>) -> Option<&str> {
        self.entries
            .get(&GroupId::new(id.as_ref()))
            .map(String::as_str)
    }

    /// Number of catalogued groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all `(id, label)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupId, &str)> {
        self.entries.iter().map(|(id, label)| (id, label.as_str()))
    }
}
