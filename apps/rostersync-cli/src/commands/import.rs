//! Import command: reconcile a roster export against the directory.
//!
//! # Usage
//!
//! Preview the plan without touching the directory:
//! ```bash
//! rostersync import roster.csv --dry-run
//! ```
//!
//! Apply without the interactive prompt (for cron):
//! ```bash
//! rostersync import roster.csv --yes
//! ```
//!
//! Emit the plan as JSON:
//! ```bash
//! rostersync import roster.csv --dry-run --json
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Args;
use dialoguer::Select;

use rostersync_connector::{ApplyOp, ConnectorError};
use rostersync_connector_ipa::{IpaConfig, IpaConnector};
use rostersync_core::{GroupId, UserAttribute};
use rostersync_engine::{ChangePlan, ReconcileConfig, Reconciler};

use crate::error::{CliError, CliResult};
use crate::loader;
use crate::output;

/// Reconcile a roster CSV export against the directory
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the roster CSV export
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Preview the plan without applying it
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Output the plan as JSON instead of the summary
    #[arg(long)]
    pub json: bool,

    /// Separator between groups in the roster's group field
    #[arg(long, default_value = "/")]
    pub group_separator: char,

    /// Groups implicitly granted to every imported user
    #[arg(long, value_delimiter = ',', default_value = "users")]
    pub default_groups: Vec<String>,

    /// Attributes to compare, in assignment order (subset of the five
    /// tracked attributes, e.g. `first_name,last_name,email_address`)
    #[arg(long, value_delimiter = ',')]
    pub attributes: Option<Vec<String>>,

    /// Directory command-line tool to invoke
    #[arg(long, default_value = "ipa", env = "ROSTERSYNC_IPA_PROGRAM")]
    pub ipa_program: String,
}

/// Execute the import command
pub async fn execute(args: ImportArgs) -> CliResult<()> {
    let (batch, row_errors) = loader::load_roster(&args.file, args.group_separator)?;
    for row_error in &row_errors {
        tracing::warn!(line = row_error.line_number, "{}", row_error.message);
        eprintln!("Warning: line {}: {}", row_error.line_number, row_error.message);
    }

    let connector = IpaConnector::new(IpaConfig::new().with_program(&args.ipa_program));
    let mut config = ReconcileConfig::default()
        .with_default_groups(args.default_groups.iter().map(|g| GroupId::new(g.as_str())));
    if let Some(keys) = &args.attributes {
        config.tracked_attributes = parse_attributes(keys)?;
    }
    let reconciler = Reconciler::with_config(&connector, config);

    let plan = reconciler.reconcile(&batch).await?;

    if plan.is_empty() {
        if args.json {
            println!("{}", output::plan_details(&plan)?);
        } else {
            println!("No changes.");
        }
        return Ok(());
    }

    if args.json {
        println!("{}", output::plan_details(&plan)?);
    } else {
        print!("{}", output::format_summary(&plan.summary()));
    }

    if args.dry_run {
        return Ok(());
    }

    if !args.yes && !confirm(&plan)? {
        println!("Cancelled.");
        return Ok(());
    }

    execute_plan(&connector, &plan).await
}

/// Map `--attributes` keys to tracked attributes.
fn parse_attributes(keys: &[String]) -> CliResult<Vec<UserAttribute>> {
    keys.iter()
        .map(|key| {
            UserAttribute::from_key(key.trim()).ok_or_else(|| {
                CliError::Validation(format!("Unknown attribute '{key}'"))
            })
        })
        .collect()
}

/// Interactive confirmation loop: apply, show details, or abort.
fn confirm(plan: &ChangePlan) -> CliResult<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation(
            "Cannot confirm in non-interactive mode. Use --yes to skip confirmation."
                .to_string(),
        ));
    }

    loop {
        let choice = Select::new()
            .with_prompt("Apply these changes?")
            .items(&["Apply", "Show details", "Abort"])
            .default(0)
            .interact()
            .map_err(|e| CliError::Input(e.to_string()))?;

        match choice {
            0 => return Ok(true),
            1 => println!("{}", output::plan_details(plan)?),
            _ => return Ok(false),
        }
    }
}

/// Apply the plan in category order.
///
/// Individual command failures are reported and counted without stopping
/// the run; only a failure to launch the directory tool at all aborts
/// immediately.
async fn execute_plan(directory: &impl ApplyOp, plan: &ChangePlan) -> CliResult<()> {
    let commands = plan.commands();
    let total = commands.len();
    let mut failed = 0usize;

    for command in &commands {
        match directory.apply(command).await {
            Ok(()) => {}
            Err(err @ ConnectorError::SpawnFailed { .. }) => return Err(err.into()),
            Err(err) => {
                tracing::error!(command = %command, error = %err, "Directory command failed");
                eprintln!("Failed: {command}: {err}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::ExecutionFailed { failed, total });
    }

    println!("Applied {total} change(s).");
    Ok(())
}
