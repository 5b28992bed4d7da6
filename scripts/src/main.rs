use std::process::ExitCode;

use clap::Parser;
use proof_stake_scripts::{
    cli::Cli,
    constants::{DEFAULT_LOG_FILTER, PROOF_STAKE_FINANCE},
    reporter::{ExitReporter, StdioReporter},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr, stdout only carries the deployed address
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.deployer() {
        Ok(deployer) => deployer.run().await,
        Err(e) => Err(e),
    };

    StdioReporter::stdio(PROOF_STAKE_FINANCE)
        .report(&result)
        .into()
}
