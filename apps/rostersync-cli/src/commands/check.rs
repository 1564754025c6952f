//! Check command: verify the directory tool is reachable.

use clap::Args;

use rostersync_connector::Directory;
use rostersync_connector_ipa::{IpaConfig, IpaConnector};

use crate::error::CliResult;

/// Verify the directory command-line tool works and the server responds
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Directory command-line tool to invoke
    #[arg(long, default_value = "ipa", env = "ROSTERSYNC_IPA_PROGRAM")]
    pub ipa_program: String,
}

/// Execute the check command
pub async fn execute(args: CheckArgs) -> CliResult<()> {
    let connector = IpaConnector::new(IpaConfig::new().with_program(&args.ipa_program));
    connector.test_connection().await?;
    println!("Directory is reachable.");
    Ok(())
}
