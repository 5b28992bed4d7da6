//! Constants used in the deploy script

/// The name of the contract artifact this script deploys
pub const PROOF_STAKE_FINANCE: &str = "ProofStakeFinance";

/// The default RPC URL, a local development node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default private key, the first default account in a local development node
pub const DEFAULT_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The default directory holding compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The default number of confirmations to wait for the deployment transaction
pub const DEFAULT_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The directory of solc build info inside the artifacts directory,
/// which never contains contract artifacts
pub const BUILD_INFO_DIR: &str = "build-info";

/// The extension of a contract artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The suffix of the debug file emitted next to every contract artifact
pub const DEBUG_ARTIFACT_SUFFIX: &str = ".dbg.json";

/// The extension of a Solidity source file, used as the directory name
/// under which that source's artifacts are emitted
pub const SOLIDITY_EXTENSION: &str = ".sol";

/// The separator between the source path and the contract name in a
/// fully qualified contract name
pub const FULLY_QUALIFIED_NAME_SEPARATOR: char = ':';

/// The deployments key in the `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The default log filter, used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";
