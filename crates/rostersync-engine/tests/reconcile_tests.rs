//! Integration tests for the reconciliation engine.
//!
//! These tests run the full flow against an in-memory directory that
//! enforces the same preconditions as a real one: users must exist
//! before modification, groups must exist before gaining members, and
//! existing entities cannot be created twice.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use rostersync_connector::{
    ApplyOp, ConnectorError, ConnectorResult, Directory, DirectoryCommand, GroupQueryOp,
    SnapshotOp,
};
use rostersync_core::{
    DirectoryEntry, DirectoryUser, GroupId, ImportBatch, Login, RawImportRow, UserAttribute,
};
use rostersync_engine::{EngineError, Reconciler};

// ============================================================================
// In-memory directory
// ============================================================================

#[derive(Default)]
struct MemoryState {
    users: HashMap<Login, DirectoryUser>,
    groups: HashSet<GroupId>,
}

/// An in-memory directory that rejects commands whose preconditions do
/// not hold, like the real one would.
#[derive(Default)]
struct MemoryDirectory {
    state: Mutex<MemoryState>,
    failing_logins: HashSet<Login>,
    failing_groups: HashSet<GroupId>,
}

impl MemoryDirectory {
    fn with_user(self, login: &str, user: DirectoryUser) -> Self {
        self.state
            .lock()
            .unwrap()
            .users
            .insert(Login::new(login), user);
        self
    }

    fn with_group(self, group: &str) -> Self {
        self.state.lock().unwrap().groups.insert(GroupId::new(group));
        self
    }

    fn user_groups(&self, login: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.users[&Login::new(login)]
            .groups
            .iter()
            .map(|g| g.as_str().to_string())
            .collect()
    }

    fn rejected(command: &DirectoryCommand, reason: &str) -> ConnectorError {
        ConnectorError::CommandFailed {
            command: command.to_string(),
            code: Some(1),
            stderr: reason.to_string(),
        }
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    fn display_name(&self) -> &str {
        "memory"
    }

    async fn test_connection(&self) -> ConnectorResult<()> {
        Ok(())
    }
}

#[async_trait]
impl SnapshotOp for MemoryDirectory {
    async fn lookup_user(&self, login: &Login) -> ConnectorResult<DirectoryEntry> {
        if self.failing_logins.contains(login) {
            return Err(ConnectorError::CommandFailed {
                command: format!("user-show {login}"),
                code: Some(1),
                stderr: "directory unavailable".to_string(),
            });
        }
        let state = self.state.lock().unwrap();
        Ok(match state.users.get(login) {
            Some(user) => DirectoryEntry::Present(user.clone()),
            None => DirectoryEntry::Absent,
        })
    }
}

#[async_trait]
impl GroupQueryOp for MemoryDirectory {
    async fn group_exists(&self, group: &GroupId) -> ConnectorResult<bool> {
        if self.failing_groups.contains(group) {
            return Err(ConnectorError::CommandFailed {
                command: format!("group-show {group}"),
                code: Some(1),
                stderr: "directory unavailable".to_string(),
            });
        }
        Ok(self.state.lock().unwrap().groups.contains(group))
    }
}

#[async_trait]
impl ApplyOp for MemoryDirectory {
    async fn apply(&self, command: &DirectoryCommand) -> ConnectorResult<()> {
        let mut state = self.state.lock().unwrap();
        match command {
            DirectoryCommand::UserAdd { login, assignments } => {
                if state.users.contains_key(login) {
                    return Err(Self::rejected(command, "user already exists"));
                }
                let mut user = DirectoryUser::default();
                apply_assignments(&mut user, assignments);
                state.users.insert(login.clone(), user);
            }
            DirectoryCommand::UserMod { login, assignments } => {
                let user = state
                    .users
                    .get_mut(login)
                    .ok_or_else(|| Self::rejected(command, "no such user"))?;
                apply_assignments(user, assignments);
            }
            DirectoryCommand::GroupAdd { group, .. } => {
                if !state.groups.insert(group.clone()) {
                    return Err(Self::rejected(command, "group already exists"));
                }
            }
            DirectoryCommand::GroupAddMember { group, members } => {
                if !state.groups.contains(group) {
                    return Err(Self::rejected(command, "no such group"));
                }
                for member in members {
                    let user = state
                        .users
                        .get_mut(member)
                        .ok_or_else(|| Self::rejected(command, "no such user"))?;
                    user.groups.insert(group.clone());
                }
            }
            DirectoryCommand::GroupRemoveMember { group, members } => {
                for member in members {
                    let user = state
                        .users
                        .get_mut(member)
                        .ok_or_else(|| Self::rejected(command, "no such user"))?;
                    user.groups.remove(group);
                }
            }
        }
        Ok(())
    }
}

fn apply_assignments(user: &mut DirectoryUser, assignments: &[rostersync_core::AttributeAssignment]) {
    for assignment in assignments {
        let slot = match assignment.attribute {
            UserAttribute::FirstName => &mut user.first_name,
            UserAttribute::LastName => &mut user.last_name,
            UserAttribute::EmailAddress => &mut user.email_address,
            UserAttribute::TelephoneNumber => &mut user.telephone_number,
            UserAttribute::MobileTelephoneNumber => &mut user.mobile_telephone_number,
        };
        *slot = assignment.value.clone();
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn jdoe_batch() -> ImportBatch {
    let rows = vec![RawImportRow::new(2, "jdoe")
        .with_first_name("Jane")
        .with_last_name("Doe")
        .with_email("0")
        .with_groups("Büro/Team")];
    ImportBatch::from_rows(rows, '/').unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_new_user_with_new_groups() {
    let directory = MemoryDirectory::default();
    let reconciler = Reconciler::new(&directory);
    let plan = reconciler.reconcile(&jdoe_batch()).await.unwrap();

    let assignments = &plan.user_add[&Login::new("jdoe")];
    assert_eq!(assignments.len(), 5);
    assert_eq!(assignments[0].attribute, UserAttribute::FirstName);
    assert_eq!(assignments[0].value, "Jane");
    assert_eq!(assignments[1].value, "Doe");
    // The "0" sentinel was cleared by the loader fixup.
    assert_eq!(assignments[2].attribute, UserAttribute::EmailAddress);
    assert_eq!(assignments[2].value, "");

    assert_eq!(
        plan.group_add_member[&GroupId::new("buero")],
        vec![Login::new("jdoe")]
    );
    assert_eq!(
        plan.group_add_member[&GroupId::new("team")],
        vec![Login::new("jdoe")]
    );

    // Neither group exists yet: both are created with their labels.
    assert_eq!(plan.group_add[&GroupId::new("buero")], Some("Büro".to_string()));
    assert_eq!(plan.group_add[&GroupId::new("team")], Some("Team".to_string()));
}

#[tokio::test]
async fn test_plan_applies_cleanly_in_category_order() {
    let directory = MemoryDirectory::default();
    let reconciler = Reconciler::new(&directory);
    let plan = reconciler.reconcile(&jdoe_batch()).await.unwrap();

    for command in plan.commands() {
        directory.apply(&command).await.unwrap();
    }

    let mut groups = directory.user_groups("jdoe");
    groups.sort();
    assert_eq!(groups, vec!["buero", "team"]);
}

#[tokio::test]
async fn test_out_of_order_execution_is_rejected() {
    let directory = MemoryDirectory::default();
    let reconciler = Reconciler::new(&directory);
    let plan = reconciler.reconcile(&jdoe_batch()).await.unwrap();

    // Membership additions before group creation: the directory refuses.
    let mut commands = plan.commands();
    commands.sort_by_key(|c| match c {
        DirectoryCommand::GroupAddMember { .. } => 0,
        _ => 1,
    });

    let mut failed = false;
    for command in commands {
        if directory.apply(&command).await.is_err() {
            failed = true;
            break;
        }
    }
    assert!(failed, "reordered execution must violate a precondition");
}

#[tokio::test]
async fn test_idempotence_after_apply() {
    let directory = MemoryDirectory::default();
    let reconciler = Reconciler::new(&directory);
    let batch = jdoe_batch();

    let plan = reconciler.reconcile(&batch).await.unwrap();
    assert!(!plan.is_empty());
    for command in plan.commands() {
        directory.apply(&command).await.unwrap();
    }

    let second = reconciler.reconcile(&batch).await.unwrap();
    assert!(second.is_empty(), "second run must be a no-op: {second:?}");
}

#[tokio::test]
async fn test_unchanged_directory_produces_empty_plan() {
    let directory = MemoryDirectory::default()
        .with_user(
            "jdoe",
            DirectoryUser {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                groups: [GroupId::new("buero"), GroupId::new("team")]
                    .into_iter()
                    .collect(),
                ..DirectoryUser::default()
            },
        )
        .with_group("buero")
        .with_group("team");

    let reconciler = Reconciler::new(&directory);
    let plan = reconciler.reconcile(&jdoe_batch()).await.unwrap();
    assert!(plan.is_empty());
}

#[tokio::test]
async fn test_modified_attributes_and_membership_moves() {
    let directory = MemoryDirectory::default()
        .with_user(
            "jdoe",
            DirectoryUser {
                first_name: "Jane".to_string(),
                last_name: "Smith".to_string(),
                groups: [GroupId::new("team"), GroupId::new("legacy")]
                    .into_iter()
                    .collect(),
                ..DirectoryUser::default()
            },
        )
        .with_group("team")
        .with_group("legacy")
        .with_group("buero");

    let reconciler = Reconciler::new(&directory);
    let plan = reconciler.reconcile(&jdoe_batch()).await.unwrap();

    // Only the last name differs.
    let assignments = &plan.user_mod[&Login::new("jdoe")];
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].attribute, UserAttribute::LastName);
    assert_eq!(assignments[0].value, "Doe");
    assert!(plan.user_add.is_empty());

    // buero gained jdoe, legacy lost them; buero already exists so no
    // group-add entry appears.
    assert!(plan.group_add.is_empty());
    assert_eq!(
        plan.group_add_member[&GroupId::new("buero")],
        vec![Login::new("jdoe")]
    );
    assert_eq!(
        plan.group_remove_member[&GroupId::new("legacy")],
        vec![Login::new("jdoe")]
    );
}

#[tokio::test]
async fn test_lookup_failure_aborts_without_plan() {
    let directory = MemoryDirectory {
        failing_logins: HashSet::from([Login::new("jdoe")]),
        ..MemoryDirectory::default()
    };

    let reconciler = Reconciler::new(&directory);
    let err = reconciler.reconcile(&jdoe_batch()).await.unwrap_err();
    match err {
        EngineError::Lookup { login, .. } => assert_eq!(login, Login::new("jdoe")),
        other => panic!("expected Lookup, got {other:?}"),
    }
}

#[tokio::test]
async fn test_existence_check_failure_aborts_without_plan() {
    let directory = MemoryDirectory {
        failing_groups: HashSet::from([GroupId::new("buero")]),
        ..MemoryDirectory::default()
    };

    let reconciler = Reconciler::new(&directory);
    let err = reconciler.reconcile(&jdoe_batch()).await.unwrap_err();
    match err {
        EngineError::GroupExistenceCheck { group, .. } => {
            assert_eq!(group, GroupId::new("buero"));
        }
        other => panic!("expected GroupExistenceCheck, got {other:?}"),
    }
}

#[tokio::test]
async fn test_batch_order_is_preserved_across_users() {
    let rows = vec![
        RawImportRow::new(2, "alice").with_groups("Finance"),
        RawImportRow::new(3, "bob").with_groups("Finance"),
        RawImportRow::new(4, "carol").with_groups("Finance"),
    ];
    let batch = ImportBatch::from_rows(rows, '/').unwrap();

    let directory = MemoryDirectory::default();
    let reconciler = Reconciler::new(&directory);
    let plan = reconciler.reconcile(&batch).await.unwrap();

    let user_order: Vec<&str> = plan.user_add.keys().map(Login::as_str).collect();
    assert_eq!(user_order, vec!["alice", "bob", "carol"]);
    assert_eq!(
        plan.group_add_member[&GroupId::new("finance")],
        vec![Login::new("alice"), Login::new("bob"), Login::new("carol")]
    );
}
