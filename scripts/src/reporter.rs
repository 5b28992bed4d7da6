//! Reporting of a deployment's outcome and the exit status it maps to

use std::{
    io::{self, Stderr, Stdout, Write},
    process::ExitCode,
};

use crate::deployer::DeploymentResult;

/// The exit status of the deploy script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The contract was deployed and its address reported
    Success = 0,
    /// The deployment failed at some stage
    Failure = 1,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

/// Reports the outcome of a deployment attempt
pub trait ExitReporter {
    /// Report the outcome, returning the status the process should exit with
    fn report(&mut self, result: &DeploymentResult) -> ExitStatus;
}

/// Reports a deployment to a pair of writers: the address line to `out` and
/// the error detail to `err`
pub struct StdioReporter<O, E> {
    /// The contract name the address line is labelled with
    label: String,
    /// Where the address line is written
    out: O,
    /// Where errors are written
    err: E,
}

impl StdioReporter<Stdout, Stderr> {
    /// A reporter writing to the process's stdout and stderr
    pub fn stdio(label: &str) -> Self {
        Self::new(label, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> StdioReporter<O, E> {
    /// Create a reporter writing to the given writers
    pub fn new(label: &str, out: O, err: E) -> Self {
        Self {
            label: label.to_string(),
            out,
            err,
        }
    }

    /// Consume the reporter, returning its writers
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> ExitReporter for StdioReporter<O, E> {
    fn report(&mut self, result: &DeploymentResult) -> ExitStatus {
        match result {
            Ok(deployed) => {
                let written = writeln!(
                    self.out,
                    "{} contract deployed to: {}",
                    self.label, deployed.address
                )
                .and_then(|_| self.out.flush());

                match written {
                    Ok(()) => ExitStatus::Success,
                    Err(e) => {
                        // The address line is the only success payload
                        let _ = writeln!(self.err, "failed to report deployed address: {e}");
                        ExitStatus::Failure
                    }
                }
            }
            Err(e) => {
                let _ = writeln!(self.err, "Error: {e}\n{e:?}");
                let _ = self.err.flush();
                ExitStatus::Failure
            }
        }
    }
}
