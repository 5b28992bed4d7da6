//! An in-memory chain interface for testing the deployer without a node

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use alloy::primitives::{Address, TxHash};

use crate::{
    chain::{ChainInterface, ContractFactory, DeployedContract, PendingDeployment},
    errors::DeployError,
};

/// How the mock chain responds to a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOutcome {
    /// Every deployment confirms at the given address
    Deployed(Address),
    /// No artifact is registered under any name
    ArtifactMissing,
    /// Submitting the deployment fails with the given message
    SubmissionFails(String),
    /// The deployment is submitted but confirming it fails with the given message
    ConfirmationFails(String),
}

/// A chain interface that answers every call from a fixed outcome
#[derive(Debug, Clone)]
pub struct MockChain {
    /// The outcome of every deployment
    outcome: MockOutcome,
    /// The number of deployment transactions submitted so far
    deploy_attempts: Arc<AtomicUsize>,
    /// The contract names factories were requested for
    requested_names: Arc<Mutex<Vec<String>>>,
}

impl MockChain {
    /// Create a mock chain answering with the given outcome
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            deploy_attempts: Arc::new(AtomicUsize::new(0)),
            requested_names: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The number of deployment transactions submitted so far
    pub fn deploy_attempts(&self) -> usize {
        self.deploy_attempts.load(Ordering::SeqCst)
    }

    /// The contract names factories were requested for, in order
    pub fn requested_names(&self) -> Vec<String> {
        self.requested_names.lock().unwrap().clone()
    }
}

impl ChainInterface for MockChain {
    type Factory = MockFactory;

    async fn contract_factory(&self, name: &str) -> Result<MockFactory, DeployError> {
        self.requested_names.lock().unwrap().push(name.to_string());
        if self.outcome == MockOutcome::ArtifactMissing {
            return Err(DeployError::ArtifactNotFound(format!(
                "artifact for contract \"{}\" not found",
                name
            )));
        }

        Ok(MockFactory {
            outcome: self.outcome.clone(),
            deploy_attempts: self.deploy_attempts.clone(),
        })
    }
}

/// A factory handed out by [`MockChain`]
#[derive(Debug)]
pub struct MockFactory {
    /// The outcome of every deployment
    outcome: MockOutcome,
    /// The chain's deployment counter
    deploy_attempts: Arc<AtomicUsize>,
}

impl ContractFactory for MockFactory {
    type Pending = MockPending;

    async fn deploy(&self) -> Result<MockPending, DeployError> {
        let attempt = self.deploy_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if let MockOutcome::SubmissionFails(msg) = &self.outcome {
            return Err(DeployError::Submission(msg.clone()));
        }

        Ok(MockPending {
            outcome: self.outcome.clone(),
            tx_hash: TxHash::with_last_byte(attempt as u8),
        })
    }
}

/// A pending deployment handed out by [`MockFactory`]
#[derive(Debug)]
pub struct MockPending {
    /// The outcome of the deployment
    outcome: MockOutcome,
    /// The hash of the deployment transaction, unique per attempt
    tx_hash: TxHash,
}

impl PendingDeployment for MockPending {
    fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    async fn deployed(self) -> Result<DeployedContract, DeployError> {
        match self.outcome {
            MockOutcome::Deployed(address) => Ok(DeployedContract {
                address,
                tx_hash: self.tx_hash,
                block_number: Some(1),
            }),
            MockOutcome::ConfirmationFails(msg) => Err(DeployError::Confirmation(msg)),
            MockOutcome::ArtifactMissing | MockOutcome::SubmissionFails(_) => {
                unreachable!("submission never succeeds for this outcome")
            }
        }
    }
}
