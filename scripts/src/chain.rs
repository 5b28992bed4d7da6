//! The chain interface consumed by the deployer, and its RPC implementation

use std::{str::FromStr, time::Duration};

use alloy::{
    network::{Ethereum, TransactionBuilder},
    primitives::{Address, TxHash},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use tracing::{debug, info};

use crate::{
    artifacts::{ArtifactStore, ContractArtifact},
    constants::DEFAULT_DEPLOY_CONFIRMATIONS,
    errors::DeployError,
};

/// The provider type used to talk to the chain
pub type Wallet = DynProvider<Ethereum>;

// ----------
// | Traits |
// ----------

/// Resolves contract factories by name
#[allow(async_fn_in_trait)]
pub trait ChainInterface {
    /// The factory type this chain hands out
    type Factory: ContractFactory;

    /// Look up the factory for the named contract artifact
    async fn contract_factory(&self, name: &str) -> Result<Self::Factory, DeployError>;
}

/// Deploys new instances of a single compiled contract
#[allow(async_fn_in_trait)]
pub trait ContractFactory {
    /// The handle returned for a submitted deployment
    type Pending: PendingDeployment;

    /// Submit a deployment transaction with no constructor arguments
    async fn deploy(&self) -> Result<Self::Pending, DeployError>;
}

/// A deployment transaction that has been submitted but not yet confirmed
#[allow(async_fn_in_trait)]
pub trait PendingDeployment {
    /// The hash of the deployment transaction
    fn tx_hash(&self) -> TxHash;

    /// Wait for the deployment to be confirmed on-chain
    async fn deployed(self) -> Result<DeployedContract, DeployError>;
}

/// A contract whose deployment has been confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedContract {
    /// The on-chain address of the contract
    pub address: Address,
    /// The hash of the transaction that created the contract
    pub tx_hash: TxHash,
    /// The block the creation transaction was included in
    pub block_number: Option<u64>,
}

// ----------------------
// | RPC Implementation |
// ----------------------

/// Sets up the provider used to deploy contracts, signing with the given
/// private key and sending requests to the given RPC url
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<Wallet, DeployError> {
    let url = Url::parse(rpc_url).map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;

    debug!("deployer address: {}", signer.address());
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);
    Ok(DynProvider::new(provider))
}

/// A chain reached over RPC, with contract artifacts read from disk
#[derive(Clone)]
pub struct RpcChain {
    /// The signing provider
    provider: Wallet,
    /// The compiled contract artifacts
    artifacts: ArtifactStore,
    /// The number of confirmations to wait for a deployment
    confirmations: u64,
    /// How long to wait for confirmation, `None` waits indefinitely
    confirmation_timeout: Option<Duration>,
}

impl RpcChain {
    /// Create a chain interface over the given provider and artifacts
    pub fn new(provider: Wallet, artifacts: ArtifactStore) -> Self {
        Self {
            provider,
            artifacts,
            confirmations: DEFAULT_DEPLOY_CONFIRMATIONS,
            confirmation_timeout: None,
        }
    }

    /// Set the number of confirmations to wait for a deployment
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    /// Set the maximum time to wait for a deployment to confirm
    pub fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }
}

impl ChainInterface for RpcChain {
    type Factory = RpcContractFactory;

    async fn contract_factory(&self, name: &str) -> Result<RpcContractFactory, DeployError> {
        let artifact = self.artifacts.find(name)?;
        Ok(RpcContractFactory {
            provider: self.provider.clone(),
            artifact,
            confirmations: self.confirmations,
            confirmation_timeout: self.confirmation_timeout,
        })
    }
}

/// A factory deploying a contract artifact over RPC
pub struct RpcContractFactory {
    /// The signing provider
    provider: Wallet,
    /// The artifact to deploy
    artifact: ContractArtifact,
    /// The number of confirmations to wait for a deployment
    confirmations: u64,
    /// How long to wait for confirmation
    confirmation_timeout: Option<Duration>,
}

impl RpcContractFactory {
    /// The artifact this factory deploys
    pub fn artifact(&self) -> &ContractArtifact {
        &self.artifact
    }
}

impl ContractFactory for RpcContractFactory {
    type Pending = RpcPendingDeployment;

    async fn deploy(&self) -> Result<RpcPendingDeployment, DeployError> {
        let expected_args = self.artifact.constructor_inputs();
        if expected_args != 0 {
            return Err(DeployError::Submission(format!(
                "{} constructor expects {} arguments, none given",
                self.artifact.contract_name, expected_args
            )));
        }

        let tx = TransactionRequest::default().with_deploy_code(self.artifact.bytecode.clone());
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| DeployError::Submission(e.to_string()))?;

        info!(
            "submitted {} deployment in tx {:#x}",
            self.artifact.contract_name,
            pending.tx_hash()
        );

        Ok(RpcPendingDeployment {
            pending: pending
                .with_required_confirmations(self.confirmations)
                .with_timeout(self.confirmation_timeout),
        })
    }
}

/// A deployment transaction in flight on an RPC chain
pub struct RpcPendingDeployment {
    /// The pending transaction
    pending: PendingTransactionBuilder<Ethereum>,
}

impl PendingDeployment for RpcPendingDeployment {
    fn tx_hash(&self) -> TxHash {
        *self.pending.tx_hash()
    }

    async fn deployed(self) -> Result<DeployedContract, DeployError> {
        let tx_hash = self.tx_hash();
        let receipt = self
            .pending
            .get_receipt()
            .await
            .map_err(|e| DeployError::Confirmation(e.to_string()))?;

        if !receipt.status() {
            return Err(DeployError::Confirmation(format!(
                "deployment tx {:#x} reverted",
                tx_hash
            )));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            DeployError::Confirmation(format!(
                "receipt for tx {:#x} has no contract address",
                tx_hash
            ))
        })?;

        Ok(DeployedContract {
            address,
            tx_hash,
            block_number: receipt.block_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use super::*;
    use crate::constants::DEFAULT_PKEY;
    use tempfile::TempDir;

    /// An RPC url nothing listens on
    const UNREACHABLE_RPC_URL: &str = "http://127.0.0.1:1";

    /// Write a minimal artifact for `name` with the given ABI
    fn write_artifact(root: &Path, name: &str, abi: serde_json::Value) {
        let dir = root.join("contracts").join(format!("{name}.sol"));
        fs::create_dir_all(&dir).unwrap();
        let artifact = serde_json::json!({
            "contractName": name,
            "sourceName": format!("contracts/{name}.sol"),
            "abi": abi,
            "bytecode": "0x6080604052348015600f57600080fd5b50",
        });
        fs::write(dir.join(format!("{name}.json")), artifact.to_string()).unwrap();
    }

    /// Build a chain pointed at an unreachable node
    fn unreachable_chain(artifacts: &Path) -> RpcChain {
        let provider = setup_client(DEFAULT_PKEY, UNREACHABLE_RPC_URL).unwrap();
        RpcChain::new(provider, ArtifactStore::new(artifacts))
    }

    #[test]
    fn test_setup_client_rejects_bad_config() {
        let err = setup_client("not a key", UNREACHABLE_RPC_URL).err().unwrap();
        assert!(matches!(err, DeployError::ClientInitialization(_)));

        let err = setup_client(DEFAULT_PKEY, "not a url").err().unwrap();
        assert!(matches!(err, DeployError::ClientInitialization(_)));
    }

    #[tokio::test]
    async fn test_unknown_artifact() {
        let tmp = TempDir::new().unwrap();
        let chain = unreachable_chain(tmp.path());

        let err = chain.contract_factory("ProofStakeFinance").await.err().unwrap();
        assert!(matches!(err, DeployError::ArtifactNotFound(_)));
    }

    #[tokio::test]
    async fn test_constructor_args_required() {
        let tmp = TempDir::new().unwrap();
        let abi = serde_json::json!([
            { "type": "constructor", "inputs": [{ "name": "owner", "type": "address" }] }
        ]);
        write_artifact(tmp.path(), "Owned", abi);

        let chain = unreachable_chain(tmp.path());
        let factory = chain.contract_factory("Owned").await.unwrap();
        let err = factory.deploy().await.err().unwrap();
        assert!(matches!(err, DeployError::Submission(_)));
    }

    #[tokio::test]
    async fn test_unreachable_node_fails_submission() {
        let tmp = TempDir::new().unwrap();
        write_artifact(tmp.path(), "ProofStakeFinance", serde_json::json!([]));

        let chain = unreachable_chain(tmp.path());
        let factory = chain.contract_factory("ProofStakeFinance").await.unwrap();
        assert_eq!(factory.artifact().contract_name, "ProofStakeFinance");

        let err = factory.deploy().await.err().unwrap();
        assert!(matches!(err, DeployError::Submission(_)));
    }
}
