//! The change plan: the reconciliation result.
//!
//! Five categories in a fixed execution order. The order is load-bearing:
//! users must exist before groups reference them, and groups must exist
//! before members are added, or the directory rejects the command.

use indexmap::IndexMap;
use serde::Serialize;

use rostersync_connector::DirectoryCommand;
use rostersync_core::{AttributeAssignment, GroupId, Login};

use crate::diff::{UserChange, UserDelta};

/// The ordered set of mutations needed to bring the directory into
/// agreement with the import batch.
///
/// Entries preserve batch processing order: users appear in roster
/// order, member lists list logins in the order their rows were
/// processed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChangePlan {
    /// Logins to create, with one assignment per tracked attribute.
    pub user_add: IndexMap<Login, Vec<AttributeAssignment>>,
    /// Existing logins to update, with the differing assignments only.
    pub user_mod: IndexMap<Login, Vec<AttributeAssignment>>,
    /// Groups to create, with an optional description. Populated by the
    /// group resolver; keys are always a subset of `group_add_member`'s.
    pub group_add: IndexMap<GroupId, Option<String>>,
    /// Logins to add per group.
    pub group_add_member: IndexMap<GroupId, Vec<Login>>,
    /// Logins to remove per group.
    pub group_remove_member: IndexMap<GroupId, Vec<Login>>,
}

impl ChangePlan {
    /// Fold one user's delta into the plan.
    ///
    /// A login lands in at most one of `user_add`/`user_mod` because the
    /// difference engine emits exactly one change kind per user.
    pub fn merge_delta(&mut self, delta: UserDelta) {
        match delta.change {
            UserChange::Add(assignments) => {
                self.user_add.insert(delta.login.clone(), assignments);
            }
            UserChange::Modify(assignments) => {
                self.user_mod.insert(delta.login.clone(), assignments);
            }
            UserChange::Unchanged => {}
        }

        for group in delta.groups_to_add {
            self.group_add_member
                .entry(group)
                .or_default()
                .push(delta.login.clone());
        }
        for group in delta.groups_to_remove {
            self.group_remove_member
                .entry(group)
                .or_default()
                .push(delta.login.clone());
        }
    }

    /// True iff all five categories are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_add.is_empty()
            && self.user_mod.is_empty()
            && self.group_add.is_empty()
            && self.group_add_member.is_empty()
            && self.group_remove_member.is_empty()
    }

    /// Per-category entry counts.
    #[must_use]
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            users_added: self.user_add.len(),
            users_modified: self.user_mod.len(),
            groups_added: self.group_add.len(),
            groups_gaining_members: self.group_add_member.len(),
            groups_losing_members: self.group_remove_member.len(),
        }
    }

    /// Translate the plan into executable commands, in the mandatory
    /// category order: add users, modify users, create groups, add
    /// memberships, remove memberships.
    #[must_use]
    pub fn commands(&self) -> Vec<DirectoryCommand> {
        let mut commands = Vec::new();

        for (login, assignments) in &self.user_add {
            commands.push(DirectoryCommand::UserAdd {
                login: login.clone(),
                assignments: assignments.clone(),
            });
        }
        for (login, assignments) in &self.user_mod {
            commands.push(DirectoryCommand::UserMod {
                login: login.clone(),
                assignments: assignments.clone(),
            });
        }
        for (group, description) in &self.group_add {
            commands.push(DirectoryCommand::GroupAdd {
                group: group.clone(),
                description: description.clone(),
            });
        }
        for (group, members) in &self.group_add_member {
            commands.push(DirectoryCommand::GroupAddMember {
                group: group.clone(),
                members: members.clone(),
            });
        }
        for (group, members) in &self.group_remove_member {
            commands.push(DirectoryCommand::GroupRemoveMember {
                group: group.clone(),
                members: members.clone(),
            });
        }

        commands
    }
}

/// Entry counts per plan category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub users_added: usize,
    pub users_modified: usize,
    pub groups_added: usize,
    pub groups_gaining_members: usize,
    pub groups_losing_members: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rostersync_core::UserAttribute;

    fn add_delta(login: &str, to_add: &[&str]) -> UserDelta {
        UserDelta {
            login: Login::new(login),
            change: UserChange::Add(vec![AttributeAssignment::new(
                UserAttribute::FirstName,
                login.to_uppercase(),
            )]),
            groups_to_add: to_add.iter().map(|g| GroupId::new(*g)).collect(),
            groups_to_remove: Vec::new(),
        }
    }

    #[test]
    fn test_empty_plan() {
        let plan = ChangePlan::default();
        assert!(plan.is_empty());
        assert!(plan.commands().is_empty());
        assert_eq!(plan.summary().users_added, 0);
    }

    #[test]
    fn test_merge_routes_change_kinds() {
        let mut plan = ChangePlan::default();
        plan.merge_delta(add_delta("alice", &[]));
        plan.merge_delta(UserDelta {
            login: Login::new("bob"),
            change: UserChange::Modify(vec![AttributeAssignment::new(
                UserAttribute::LastName,
                "B",
            )]),
            groups_to_add: Vec::new(),
            groups_to_remove: vec![GroupId::new("legacy")],
        });
        plan.merge_delta(UserDelta {
            login: Login::new("carol"),
            change: UserChange::Unchanged,
            groups_to_add: Vec::new(),
            groups_to_remove: Vec::new(),
        });

        assert_eq!(plan.user_add.len(), 1);
        assert_eq!(plan.user_mod.len(), 1);
        assert!(plan.user_add.contains_key(&Login::new("alice")));
        assert!(plan.user_mod.contains_key(&Login::new("bob")));
        // carol was a no-op and appears nowhere
        assert!(!plan.user_add.contains_key(&Login::new("carol")));
        assert!(!plan.user_mod.contains_key(&Login::new("carol")));
        assert_eq!(
            plan.group_remove_member[&GroupId::new("legacy")],
            vec![Login::new("bob")]
        );
    }

    #[test]
    fn test_member_lists_preserve_processing_order() {
        let mut plan = ChangePlan::default();
        plan.merge_delta(add_delta("alice", &["buero"]));
        plan.merge_delta(add_delta("bob", &["buero"]));
        assert_eq!(
            plan.group_add_member[&GroupId::new("buero")],
            vec![Login::new("alice"), Login::new("bob")]
        );
    }

    #[test]
    fn test_commands_follow_category_order() {
        let mut plan = ChangePlan::default();
        plan.merge_delta(add_delta("alice", &["buero"]));
        plan.merge_delta(UserDelta {
            login: Login::new("bob"),
            change: UserChange::Modify(vec![]),
            groups_to_add: Vec::new(),
            groups_to_remove: vec![GroupId::new("legacy")],
        });
        plan.group_add
            .insert(GroupId::new("buero"), Some("Büro".to_string()));

        let verbs: Vec<&str> = plan.commands().iter().map(|c| c.verb()).collect();
        assert_eq!(
            verbs,
            vec!["user-add", "user-mod", "group-add", "group-add-member", "group-remove-member"]
        );
    }

    #[test]
    fn test_serializes_with_kebab_case_categories() {
        let mut plan = ChangePlan::default();
        plan.merge_delta(add_delta("alice", &["buero"]));
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("user-add").is_some());
        assert!(json.get("group-add-member").is_some());
        assert!(json["group-add-member"]["buero"][0] == "alice");
    }
}
