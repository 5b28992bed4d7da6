//! The one-shot deployment procedure

use std::{
    fmt::{self, Display},
    path::PathBuf,
};

use tracing::{error, info};

use crate::{
    chain::{ChainInterface, ContractFactory, DeployedContract, PendingDeployment},
    constants::PROOF_STAKE_FINANCE,
    errors::DeployError,
    utils::write_deployed_address,
};

/// The outcome of a single deployment attempt
pub type DeploymentResult = Result<DeployedContract, DeployError>;

/// The stages a deployment moves through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeployStage {
    /// Nothing has happened yet
    Start,
    /// The contract factory was found
    FactoryResolved,
    /// The deployment transaction was submitted
    Submitted,
    /// The deployment was confirmed on-chain
    Confirmed,
}

impl Display for DeployStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployStage::Start => write!(f, "start"),
            DeployStage::FactoryResolved => write!(f, "factory-resolved"),
            DeployStage::Submitted => write!(f, "submitted"),
            DeployStage::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Deploys a single contract through a chain interface
pub struct Deployer<C> {
    /// The chain to deploy to
    chain: C,
    /// The name of the contract artifact to deploy
    contract_name: String,
    /// Where to record the deployed address, if anywhere
    deployments_path: Option<PathBuf>,
}

impl<C: ChainInterface> Deployer<C> {
    /// Create a deployer for the `ProofStakeFinance` contract
    pub fn new(chain: C) -> Self {
        Self {
            chain,
            contract_name: PROOF_STAKE_FINANCE.to_string(),
            deployments_path: None,
        }
    }

    /// Record the deployed address in the given deployments file
    pub fn with_deployments_path(mut self, path: Option<PathBuf>) -> Self {
        self.deployments_path = path;
        self
    }

    /// The name of the contract this deployer deploys
    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    /// Run one deployment attempt.
    ///
    /// Each call is independent: it resolves the factory, submits a fresh
    /// deployment transaction, and waits for it to confirm. Errors are never
    /// retried.
    pub async fn run(&self) -> DeploymentResult {
        let res = self.deploy().await;
        if let Err(e) = &res {
            error!(stage = %e.stage(), "{} deployment failed: {}", self.contract_name, e);
        }

        res
    }

    /// Step through the deployment stages, stopping at the first error
    async fn deploy(&self) -> DeploymentResult {
        let factory = self.chain.contract_factory(&self.contract_name).await?;
        info!(stage = %DeployStage::FactoryResolved, "resolved {} factory", self.contract_name);

        let pending = factory.deploy().await?;
        info!(
            stage = %DeployStage::Submitted,
            "waiting for deployment tx {:#x} to confirm",
            pending.tx_hash()
        );

        let deployed = pending.deployed().await?;
        info!(
            stage = %DeployStage::Confirmed,
            "{} deployed to {} in block {:?}",
            self.contract_name,
            deployed.address,
            deployed.block_number
        );

        if let Some(path) = &self.deployments_path {
            // The contract is live at this point, so the error must still name it
            write_deployed_address(path, &self.contract_name, deployed.address).map_err(
                |e| match e {
                    DeployError::WriteDeployments(s) => DeployError::WriteDeployments(format!(
                        "{}: {} is deployed at {:#x} but was not recorded",
                        s, self.contract_name, deployed.address
                    )),
                    e => e,
                },
            )?;
            info!("recorded {} in {}", self.contract_name, path.display());
        }

        Ok(deployed)
    }
}
