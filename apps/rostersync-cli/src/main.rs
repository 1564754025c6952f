//! rostersync - bring an identity directory into agreement with an HR
//! roster export.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rostersync_cli::commands;
use rostersync_cli::error::CliResult;

/// rostersync - roster-to-directory reconciliation
#[derive(Parser)]
#[command(name = "rostersync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a roster CSV export against the directory
    Import(commands::import::ImportArgs),

    /// Verify the directory tool is reachable
    Check(commands::check::CheckArgs),
}

/// Initialize logging to stderr, honoring `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Import(args) => commands::import::execute(args).await,
        Commands::Check(args) => commands::check::execute(args).await,
    }
}
