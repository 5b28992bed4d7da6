//! Definitions of CLI arguments for the deploy script
//!
//! Every argument has a default, so the script runs with no arguments
//! against a local development node.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    artifacts::ArtifactStore,
    chain::{setup_client, RpcChain},
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOY_CONFIRMATIONS, DEFAULT_PKEY, DEFAULT_RPC_URL,
    },
    deployer::Deployer,
    errors::DeployError,
};

/// Deploy the ProofStakeFinance contract
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Private key of the deployer
    #[arg(short, long = "pkey", env = "PKEY", default_value = DEFAULT_PKEY, hide_default_value = true)]
    pub priv_key: String,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Number of confirmations to wait for the deployment transaction
    #[arg(short, long, env = "DEPLOY_CONFIRMATIONS", default_value_t = DEFAULT_DEPLOY_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Seconds to wait for the deployment to confirm before giving up.
    /// Waits indefinitely when unset
    #[arg(long)]
    pub confirmation_timeout: Option<u64>,

    /// Path of a `deployments.json` file to record the deployed address in
    #[arg(short, long)]
    pub deployments_path: Option<PathBuf>,
}

impl Cli {
    /// Build the deployer described by these arguments
    pub fn deployer(&self) -> Result<Deployer<RpcChain>, DeployError> {
        let provider = setup_client(&self.priv_key, &self.rpc_url)?;
        let chain = RpcChain::new(provider, ArtifactStore::new(&self.artifacts_dir))
            .with_confirmations(self.confirmations)
            .with_confirmation_timeout(self.confirmation_timeout.map(Duration::from_secs));

        Ok(Deployer::new(chain).with_deployments_path(self.deployments_path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, FromArgMatches};

    use super::*;

    /// Parse the given arguments with every environment fallback removed, so
    /// the result only depends on the arguments and the defaults
    fn parse_without_env(args: &[&str]) -> Cli {
        let matches = Cli::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(args)
            .unwrap();
        Cli::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn test_runs_without_arguments() {
        let cli = parse_without_env(&["deploy"]);
        assert_eq!(cli.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(cli.priv_key, DEFAULT_PKEY);
        assert_eq!(cli.artifacts_dir, PathBuf::from(DEFAULT_ARTIFACTS_DIR));
        assert_eq!(cli.confirmations, DEFAULT_DEPLOY_CONFIRMATIONS);
        assert!(cli.confirmation_timeout.is_none());
        assert!(cli.deployments_path.is_none());
        assert!(cli.deployer().is_ok());
    }

    #[test]
    fn test_explicit_arguments() {
        let cli = parse_without_env(&[
            "deploy",
            "--rpc-url",
            "http://localhost:9545",
            "--artifacts-dir",
            "build/artifacts",
            "--confirmations",
            "3",
            "--confirmation-timeout",
            "120",
            "--deployments-path",
            "deployments.devnet.json",
        ]);

        assert_eq!(cli.rpc_url, "http://localhost:9545");
        assert_eq!(cli.artifacts_dir, PathBuf::from("build/artifacts"));
        assert_eq!(cli.confirmations, 3);
        assert_eq!(cli.confirmation_timeout, Some(120));
        assert_eq!(
            cli.deployments_path,
            Some(PathBuf::from("deployments.devnet.json"))
        );
    }

    #[test]
    fn test_bad_private_key_fails_client_setup() {
        let cli = parse_without_env(&["deploy", "--pkey", "0x1234"]);
        let err = cli.deployer().err().unwrap();
        assert!(matches!(err, DeployError::ClientInitialization(_)));
    }
}
