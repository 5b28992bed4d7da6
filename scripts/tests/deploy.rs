//! End-to-end runs of the deployer against an in-memory chain, reported the
//! way the `deploy` binary reports them

use alloy::primitives::{address, Address};
use eyre::Result;
use proof_stake_scripts::{
    constants::PROOF_STAKE_FINANCE,
    deployer::Deployer,
    reporter::{ExitReporter, ExitStatus, StdioReporter},
    test_helpers::{MockChain, MockOutcome},
};

/// The address the mock chain deploys to
const DEPLOYED: Address = address!("0xAbC1230000000000000000000000000000000001");

/// Run a deployment against a mock chain, returning the exit status and
/// what was written to stdout and stderr
async fn run_with(outcome: MockOutcome) -> Result<(ExitStatus, String, String)> {
    let deployer = Deployer::new(MockChain::new(outcome));
    let result = deployer.run().await;

    let mut reporter = StdioReporter::new(PROOF_STAKE_FINANCE, Vec::new(), Vec::new());
    let status = reporter.report(&result);
    let (out, err) = reporter.into_inner();

    Ok((status, String::from_utf8(out)?, String::from_utf8(err)?))
}

#[tokio::test]
async fn test_deploy_success() -> Result<()> {
    let (status, out, err) = run_with(MockOutcome::Deployed(DEPLOYED)).await?;

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(out.lines().count(), 1);
    assert_eq!(
        out,
        format!("ProofStakeFinance contract deployed to: {DEPLOYED}\n")
    );
    assert!(err.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_artifact_not_found() -> Result<()> {
    let (status, out, err) = run_with(MockOutcome::ArtifactMissing).await?;

    assert_eq!(status, ExitStatus::Failure);
    assert!(out.is_empty());
    assert!(err.contains("artifact not found"));
    assert!(err.contains(PROOF_STAKE_FINANCE));
    Ok(())
}

#[tokio::test]
async fn test_submission_timeout() -> Result<()> {
    let outcome = MockOutcome::SubmissionFails("request timed out".to_string());
    let (status, out, err) = run_with(outcome).await?;

    assert_eq!(status, ExitStatus::Failure);
    assert!(out.is_empty());
    assert!(err.contains("request timed out"));
    Ok(())
}

#[tokio::test]
async fn test_confirmation_failure() -> Result<()> {
    let outcome = MockOutcome::ConfirmationFails("transaction reverted".to_string());
    let (status, out, err) = run_with(outcome).await?;

    assert_eq!(status, ExitStatus::Failure);
    assert!(out.is_empty());
    assert!(err.contains("transaction reverted"));
    Ok(())
}

#[tokio::test]
async fn test_repeated_runs_are_independent() -> Result<()> {
    let failing = run_with(MockOutcome::SubmissionFails("nonce too low".to_string())).await?;
    let succeeding = run_with(MockOutcome::Deployed(DEPLOYED)).await?;

    assert_eq!(failing.0, ExitStatus::Failure);
    assert_eq!(succeeding.0, ExitStatus::Success);
    Ok(())
}
