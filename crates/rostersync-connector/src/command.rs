//! Executable directory commands.
//!
//! A [`DirectoryCommand`] is one entry of a change plan in primary-key +
//! assignments form, ready for an adapter to translate into its native
//! mutation. How assignments are rendered (flag syntax, API payloads) is
//! the adapter's concern.

use serde::Serialize;

use rostersync_core::{AttributeAssignment, GroupId, Login};

/// One directory mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum DirectoryCommand {
    /// Create a user with the given attribute assignments.
    UserAdd {
        login: Login,
        assignments: Vec<AttributeAssignment>,
    },
    /// Update an existing user's attributes.
    UserMod {
        login: Login,
        assignments: Vec<AttributeAssignment>,
    },
    /// Create a group, optionally with a description.
    GroupAdd {
        group: GroupId,
        description: Option<String>,
    },
    /// Add members to a group.
    GroupAddMember {
        group: GroupId,
        members: Vec<Login>,
    },
    /// Remove members from a group.
    GroupRemoveMember {
        group: GroupId,
        members: Vec<Login>,
    },
}

impl DirectoryCommand {
    /// The directory verb for this command.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            DirectoryCommand::UserAdd { .. } => "user-add",
            DirectoryCommand::UserMod { .. } => "user-mod",
            DirectoryCommand::GroupAdd { .. } => "group-add",
            DirectoryCommand::GroupAddMember { .. } => "group-add-member",
            DirectoryCommand::GroupRemoveMember { .. } => "group-remove-member",
        }
    }

    /// The primary key the command operates on (login or group id).
    #[must_use]
    pub fn primary_key(&self) -> &str {
        match self {
            DirectoryCommand::UserAdd { login, .. } | DirectoryCommand::UserMod { login, .. } => {
                login.as_str()
            }
            DirectoryCommand::GroupAdd { group, .. }
            | DirectoryCommand::GroupAddMember { group, .. }
            | DirectoryCommand::GroupRemoveMember { group, .. } => group.as_str(),
        }
    }
}

impl std::fmt::Display for DirectoryCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.verb(), self.primary_key())
    }
}
