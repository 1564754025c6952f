//! Parsing of `ipa user-show` output.
//!
//! The tool prints one `Label: value` line per attribute, e.g.
//!
//! ```text
//!   User login: jdoe
//!   First name: Jane
//!   Member of groups: buero, team
//! ```
//!
//! Labels are folded to snake_case keys; the membership list is split on
//! `", "` with empty segments dropped.

use std::collections::BTreeSet;

use rostersync_core::{DirectoryUser, GroupId};

/// Parse one user entry from `ipa user-show --all` standard output.
pub(crate) fn parse_user_entry(stdout: &str) -> DirectoryUser {
    let mut user = DirectoryUser::default();

    for line in stdout.trim().lines() {
        // Lines without a colon are value continuations; only the
        // labelled lines carry the attributes tracked here.
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let key = label.trim().to_lowercase().replace(' ', "_");
        let value = value.trim();

        match key.as_str() {
            "first_name" => user.first_name = value.to_string(),
            "last_name" => user.last_name = value.to_string(),
            "email_address" => user.email_address = value.to_string(),
            "telephone_number" => user.telephone_number = value.to_string(),
            "mobile_telephone_number" => user.mobile_telephone_number = value.to_string(),
            "member_of_groups" => user.groups = parse_group_list(value),
            _ => {}
        }
    }

    user
}

/// Split the directory's comma-space-separated membership field.
fn parse_group_list(value: &str) -> BTreeSet<GroupId> {
    value
        .split(", ")
        .filter(|segment| !segment.is_empty())
        .map(GroupId::new)
        .collect()
}
