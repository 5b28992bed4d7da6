//! Utilities for the deploy script.

use std::{fs, path::Path};

use alloy::primitives::Address;
use serde_json::{Map, Value};

use crate::{constants::DEPLOYMENTS_KEY, errors::DeployError};

/// Record a deployed contract's address in the deployments file under
/// `contract_key`, creating the file if it doesn't exist and keeping every
/// other entry in it
pub fn write_deployed_address(
    file_path: &Path,
    contract_key: &str,
    address: Address,
) -> Result<(), DeployError> {
    let mut parsed_json = if file_path.exists() {
        let contents = fs::read_to_string(file_path)
            .map_err(|e| DeployError::WriteDeployments(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| DeployError::WriteDeployments(e.to_string()))?
    } else {
        Value::Object(Map::new())
    };

    let deployments = parsed_json
        .as_object_mut()
        .ok_or_else(|| {
            DeployError::WriteDeployments("deployments file is not a JSON object".to_string())
        })?
        .entry(DEPLOYMENTS_KEY)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| {
            DeployError::WriteDeployments(format!("`{}` is not a JSON object", DEPLOYMENTS_KEY))
        })?;
    deployments.insert(
        contract_key.to_string(),
        Value::String(format!("{address:#x}")),
    );

    let contents = serde_json::to_string_pretty(&parsed_json)
        .map_err(|e| DeployError::WriteDeployments(e.to_string()))?;
    fs::write(file_path, contents).map_err(|e| DeployError::WriteDeployments(e.to_string()))?;

    Ok(())
}
