//! Terminal output formatting.

use rostersync_engine::{ChangePlan, PlanSummary};

use crate::error::CliResult;

/// Render the change summary shown before confirmation.
#[must_use]
pub fn format_summary(summary: &PlanSummary) -> String {
    format!(
        "The following changes will be applied:\n\
         \x20 - Added users: {}\n\
         \x20 - Modified users: {}\n\
         \x20 - Added groups: {}\n\
         \x20 - Adding users to groups: {}\n\
         \x20 - Removing users from groups: {}\n",
        summary.users_added,
        summary.users_modified,
        summary.groups_added,
        summary.groups_gaining_members,
        summary.groups_losing_members,
    )
}

/// Render the full plan as pretty JSON for the details view and
/// `--json` output.
pub fn plan_details(plan: &ChangePlan) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}
