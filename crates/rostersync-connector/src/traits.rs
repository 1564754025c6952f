//! Directory capability traits.
//!
//! Adapters implement the base [`Directory`] trait plus whichever
//! capabilities they support. The reconciliation engine only requires
//! [`SnapshotOp`] and [`GroupQueryOp`]; executing a change plan
//! additionally requires [`ApplyOp`].

use async_trait::async_trait;

use rostersync_core::{DirectoryEntry, GroupId, Login};

use crate::command::DirectoryCommand;
use crate::error::ConnectorResult;

/// Base trait for all directory adapters.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Display name for this directory instance, used in logs and
    /// error messages.
    fn display_name(&self) -> &str;

    /// Verify the directory is reachable and the adapter is usable.
    async fn test_connection(&self) -> ConnectorResult<()>;
}

/// Capability for fetching current user records.
#[async_trait]
pub trait SnapshotOp: Directory {
    /// Fetch the directory's current record for one login.
    ///
    /// A login unknown to the directory yields
    /// [`DirectoryEntry::Absent`], not an error.
    async fn lookup_user(&self, login: &Login) -> ConnectorResult<DirectoryEntry>;

    /// Fetch records for a set of logins, in the given order.
    ///
    /// The default implementation performs one lookup per login;
    /// adapters may override it to batch or dispatch concurrently, as
    /// long as result order matches input order.
    async fn lookup_users(&self, logins: &[Login]) -> ConnectorResult<Vec<DirectoryEntry>> {
        let mut entries = Vec::with_capacity(logins.len());
        for login in logins {
            entries.push(self.lookup_user(login).await?);
        }
        Ok(entries)
    }
}

/// Capability for group existence checks.
#[async_trait]
pub trait GroupQueryOp: Directory {
    /// Check whether a group exists in the directory.
    ///
    /// Must return an error when the answer cannot be determined; the
    /// engine never guesses in either direction.
    async fn group_exists(&self, group: &GroupId) -> ConnectorResult<bool>;
}

/// Capability for executing change plan commands.
#[async_trait]
pub trait ApplyOp: Directory {
    /// Execute a single directory command.
    async fn apply(&self, command: &DirectoryCommand) -> ConnectorResult<()>;
}

/// Marker trait for adapters that support the full reconciliation flow.
pub trait FullDirectory: SnapshotOp + GroupQueryOp + ApplyOp {}

// Blanket implementation for any adapter with all three capabilities
impl<T> FullDirectory for T where T: SnapshotOp + GroupQueryOp + ApplyOp {}

#[cfg(test)]
mod tests {
    use super::*;
    use rostersync_core::DirectoryUser;

    // Minimal adapter answering from a fixed set of logins
    struct FixedDirectory {
        known: Vec<Login>,
    }

    #[async_trait]
    impl Directory for FixedDirectory {
        fn display_name(&self) -> &str {
            "fixed"
        }

        async fn test_connection(&self) -> ConnectorResult<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl SnapshotOp for FixedDirectory {
        async fn lookup_user(&self, login: &Login) -> ConnectorResult<DirectoryEntry> {
            if self.known.contains(login) {
                Ok(DirectoryEntry::Present(DirectoryUser::default()))
            } else {
                Ok(DirectoryEntry::Absent)
            }
        }
    }

    #[tokio::test]
    async fn test_lookup_users_default_preserves_order() {
        let directory = FixedDirectory {
            known: vec![Login::new("alice")],
        };
        let logins = vec![Login::new("bob"), Login::new("alice")];
        let entries = directory.lookup_users(&logins).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].is_present());
        assert!(entries[1].is_present());
    }
}
