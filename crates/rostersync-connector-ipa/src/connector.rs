//! The FreeIPA command-line adapter.

use async_trait::async_trait;
use tokio::process::Command;

use rostersync_connector::{
    ApplyOp, ConnectorError, ConnectorResult, Directory, DirectoryCommand, GroupQueryOp,
    SnapshotOp,
};
use rostersync_core::{DirectoryEntry, GroupId, Login};

use crate::config::IpaConfig;
use crate::output::parse_user_entry;

/// FreeIPA's exit code for "entry not found".
const EXIT_NOT_FOUND: i32 = 2;

/// Directory adapter backed by the `ipa` command-line tool.
pub struct IpaConnector {
    config: IpaConfig,
}

impl IpaConnector {
    /// Create a connector with the given configuration.
    #[must_use]
    pub fn new(config: IpaConfig) -> Self {
        Self { config }
    }

    /// Run the tool with the given arguments, capturing output.
    async fn run(&self, args: &[String]) -> ConnectorResult<std::process::Output> {
        tracing::debug!(program = %self.config.program, ?args, "Invoking directory tool");
        Command::new(&self.config.program)
            .args(args)
            .output()
            .await
            .map_err(|source| ConnectorError::SpawnFailed {
                program: self.config.program.clone(),
                source,
            })
    }

    fn command_failed(context: String, output: &std::process::Output) -> ConnectorError {
        ConnectorError::CommandFailed {
            command: context,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Build the full argument vector for one directory command.
///
/// `--no-prompt` keeps the tool from asking for unset attributes
/// interactively; the roster is authoritative for everything tracked.
pub(crate) fn command_argv(command: &DirectoryCommand) -> Vec<String> {
    let mut argv = vec![
        "--no-prompt".to_string(),
        command.verb().to_string(),
        command.primary_key().to_string(),
    ];

    match command {
        DirectoryCommand::UserAdd { assignments, .. }
        | DirectoryCommand::UserMod { assignments, .. } => {
            argv.extend(
                assignments
                    .iter()
                    .map(|a| format!("--{}={}", a.attribute.flag(), a.value)),
            );
        }
        DirectoryCommand::GroupAdd { description, .. } => {
            if let Some(description) = description {
                argv.push(format!("--desc={description}"));
            }
        }
        DirectoryCommand::GroupAddMember { members, .. }
        | DirectoryCommand::GroupRemoveMember { members, .. } => {
            argv.extend(members.iter().map(|m| format!("--users={m}")));
        }
    }

    argv
}

#[async_trait]
impl Directory for IpaConnector {
    fn display_name(&self) -> &str {
        "freeipa"
    }

    async fn test_connection(&self) -> ConnectorResult<()> {
        let output = self.run(&["ping".to_string()]).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(Self::command_failed("ping".to_string(), &output))
        }
    }
}

#[async_trait]
impl SnapshotOp for IpaConnector {
    async fn lookup_user(&self, login: &Login) -> ConnectorResult<DirectoryEntry> {
        let args = vec![
            "user-show".to_string(),
            "--all".to_string(),
            login.as_str().to_string(),
        ];
        let output = self.run(&args).await?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Ok(DirectoryEntry::Present(parse_user_entry(&stdout)));
        }
        if output.status.code() == Some(EXIT_NOT_FOUND) {
            return Ok(DirectoryEntry::Absent);
        }
        Err(Self::command_failed(format!("user-show {login}"), &output))
    }
}

#[async_trait]
impl GroupQueryOp for IpaConnector {
    async fn group_exists(&self, group: &GroupId) -> ConnectorResult<bool> {
        let args = vec!["group-show".to_string(), group.as_str().to_string()];
        let output = self.run(&args).await?;

        if output.status.success() {
            return Ok(true);
        }
        if output.status.code() == Some(EXIT_NOT_FOUND) {
            return Ok(false);
        }
        // Anything else is indeterminate; never guess group existence.
        Err(Self::command_failed(format!("group-show {group}"), &output))
    }
}

#[async_trait]
impl ApplyOp for IpaConnector {
    async fn apply(&self, command: &DirectoryCommand) -> ConnectorResult<()> {
        let output = self.run(&command_argv(command)).await?;
        if output.status.success() {
            tracing::info!(command = %command, "Applied directory command");
            Ok(())
        } else {
            Err(Self::command_failed(command.to_string(), &output))
        }
    }
}
