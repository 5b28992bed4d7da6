//! Script for deploying the ProofStakeFinance contract.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod chain;
pub mod cli;
pub mod constants;
pub mod deployer;
pub mod errors;
pub mod reporter;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod utils;
