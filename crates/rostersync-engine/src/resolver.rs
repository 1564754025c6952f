//! Group resolution.
//!
//! Determines which groups referenced by membership additions do not yet
//! exist in the directory and therefore must be created first.

use indexmap::IndexMap;

use rostersync_connector::GroupQueryOp;
use rostersync_core::{GroupCatalog, GroupId};

use crate::error::{EngineError, EngineResult};
use crate::plan::ChangePlan;

/// Compute the `group-add` category for a plan.
///
/// Every group keyed in `group_add_member` is checked against the
/// directory; groups that do not exist are returned with the catalog's
/// description where one is known. Existing groups are skipped, never
/// recreated. A failed existence check aborts the whole resolution.
pub async fn resolve_group_additions<D>(
    plan: &ChangePlan,
    catalog: &GroupCatalog,
    directory: &D,
) -> EngineResult<IndexMap<GroupId, Option<String>>>
where
    D: GroupQueryOp + ?Sized,
{
    let mut additions = IndexMap::new();

    for group in plan.group_add_member.keys() {
        let exists = directory
            .group_exists(group)
            .await
            .map_err(|source| EngineError::GroupExistenceCheck {
                group: group.clone(),
                source,
            })?;

        if exists {
            tracing::debug!(group = %group, "Group already exists");
            continue;
        }

        let description = catalog.description(group.as_str()).map(str::to_string);
        tracing::debug!(group = %group, description = ?description, "Group needs creation");
        additions.insert(group.clone(), description);
    }

    Ok(additions)
}
