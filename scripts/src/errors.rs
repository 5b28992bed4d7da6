//! Definitions of errors that can occur while deploying a contract

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::deployer::DeployStage;

/// Errors that can occur during a deployment attempt
///
/// None of these are recovered from locally, every variant maps to a
/// failed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployError {
    /// No compiled artifact is registered under the requested name
    ArtifactNotFound(String),
    /// The artifact exists but could not be turned into a contract factory
    ArtifactParsing(String),
    /// The deployment transaction could not be submitted
    Submission(String),
    /// The deployment transaction was submitted but never confirmed
    Confirmation(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error writing the `deployments.json` file
    WriteDeployments(String),
}

impl DeployError {
    /// The last stage the deployment reached before this error occurred
    pub fn stage(&self) -> DeployStage {
        match self {
            DeployError::ClientInitialization(_)
            | DeployError::ArtifactNotFound(_)
            | DeployError::ArtifactParsing(_) => DeployStage::Start,
            DeployError::Submission(_) => DeployStage::FactoryResolved,
            DeployError::Confirmation(_) => DeployStage::Submitted,
            DeployError::WriteDeployments(_) => DeployStage::Confirmed,
        }
    }
}

impl Display for DeployError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeployError::ArtifactNotFound(s) => write!(f, "artifact not found: {}", s),
            DeployError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            DeployError::Submission(s) => {
                write!(f, "error submitting deployment transaction: {}", s)
            }
            DeployError::Confirmation(s) => write!(f, "error confirming deployment: {}", s),
            DeployError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            DeployError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
        }
    }
}

impl Error for DeployError {}
