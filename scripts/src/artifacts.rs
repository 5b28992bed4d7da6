//! Lookup of compiled contract artifacts by contract name
//!
//! Artifacts are laid out the way Hardhat emits them:
//! `<artifacts>/<source path>/<Name>.sol/<Name>.json`, next to a
//! `<Name>.dbg.json` file and a `build-info` directory, both of which are
//! ignored here.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::Bytes;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    constants::{
        ARTIFACT_EXTENSION, BUILD_INFO_DIR, DEBUG_ARTIFACT_SUFFIX, FULLY_QUALIFIED_NAME_SEPARATOR,
        SOLIDITY_EXTENSION,
    },
    errors::DeployError,
};

/// The subset of a compiled contract artifact needed to deploy it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// The name of the contract
    pub contract_name: String,
    /// The path of the source file the contract is defined in
    #[serde(default)]
    pub source_name: String,
    /// The JSON ABI of the contract
    #[serde(default)]
    pub abi: Value,
    /// The creation bytecode of the contract
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// The fully qualified name of the contract, `<source>:<name>`
    pub fn fully_qualified_name(&self) -> String {
        format!(
            "{}{}{}",
            self.source_name, FULLY_QUALIFIED_NAME_SEPARATOR, self.contract_name
        )
    }

    /// The number of arguments the contract's constructor takes
    pub fn constructor_inputs(&self) -> usize {
        self.abi
            .as_array()
            .into_iter()
            .flatten()
            .find(|item| item["type"] == "constructor")
            .and_then(|constructor| constructor["inputs"].as_array())
            .map_or(0, Vec::len)
    }
}

/// A directory of compiled contract artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// The root of the artifacts directory
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given artifacts directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root of the artifacts directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find and parse the artifact for the given contract.
    ///
    /// `name` is either a bare contract name, which must match exactly one
    /// artifact in the store, or a fully qualified `path/To.sol:Name`.
    pub fn find(&self, name: &str) -> Result<ContractArtifact, DeployError> {
        let path = match name.rsplit_once(FULLY_QUALIFIED_NAME_SEPARATOR) {
            Some((source, contract)) => self.fully_qualified_path(name, source, contract)?,
            None => self.unique_path(name)?,
        };

        debug!("reading artifact for {} from {}", name, path.display());
        let contents =
            fs::read_to_string(&path).map_err(|e| DeployError::ArtifactParsing(e.to_string()))?;
        let artifact: ContractArtifact = serde_json::from_str(&contents).map_err(|e| {
            DeployError::ArtifactParsing(format!("{}: {}", path.display(), e))
        })?;

        if artifact.bytecode.is_empty() {
            return Err(DeployError::ArtifactParsing(format!(
                "{} is abstract or an interface and cannot be deployed",
                artifact.fully_qualified_name()
            )));
        }

        Ok(artifact)
    }

    /// The artifact path for a fully qualified contract name
    fn fully_qualified_path(
        &self,
        name: &str,
        source: &str,
        contract: &str,
    ) -> Result<PathBuf, DeployError> {
        let path = self
            .root
            .join(source)
            .join(format!("{}.{}", contract, ARTIFACT_EXTENSION));

        if path.is_file() {
            Ok(path)
        } else {
            Err(DeployError::ArtifactNotFound(format!(
                "no artifact for {} in {}",
                name,
                self.root.display()
            )))
        }
    }

    /// The artifact path for a bare contract name, which must be unambiguous
    fn unique_path(&self, name: &str) -> Result<PathBuf, DeployError> {
        let mut candidates = Vec::new();
        collect_artifacts(&self.root, name, &mut candidates);

        match candidates.len() {
            0 => Err(DeployError::ArtifactNotFound(format!(
                "no artifact for {} in {}",
                name,
                self.root.display()
            ))),
            1 => Ok(candidates.remove(0)),
            _ => {
                let mut names: Vec<String> = candidates
                    .iter()
                    .map(|path| self.fully_qualified_name_of(path, name))
                    .collect();
                names.sort();

                Err(DeployError::ArtifactNotFound(format!(
                    "multiple artifacts for {}, use one of the fully qualified names: {}",
                    name,
                    names.join(", ")
                )))
            }
        }
    }

    /// Reconstruct the fully qualified name of the artifact at `path`
    fn fully_qualified_name_of(&self, path: &Path, name: &str) -> String {
        let source = path
            .parent()
            .and_then(|dir| dir.strip_prefix(&self.root).ok())
            .map(|dir| dir.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();

        format!("{}{}{}", source, FULLY_QUALIFIED_NAME_SEPARATOR, name)
    }
}

/// Recursively collect the artifact files for the contract `name` under `dir`.
///
/// Unreadable directories are skipped, a missing artifacts directory simply
/// yields no candidates. Symlinked directories are not followed.
fn collect_artifacts(dir: &Path, name: &str, candidates: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let file_name = format!("{}.{}", name, ARTIFACT_EXTENSION);
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if entry.file_name() != BUILD_INFO_DIR {
                collect_artifacts(&entry.path(), name, candidates);
            }
            continue;
        }

        let entry_name = entry.file_name();
        let is_artifact = entry_name == file_name.as_str()
            && !entry_name.to_string_lossy().ends_with(DEBUG_ARTIFACT_SUFFIX)
            && dir
                .file_name()
                .is_some_and(|parent| parent.to_string_lossy().ends_with(SOLIDITY_EXTENSION));

        if is_artifact {
            candidates.push(entry.path());
        }
    }
}
