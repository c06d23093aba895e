//! Configuration for talking to cardano-cli.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CardanoKitError, Result};

pub const DEFAULT_BIN_PATH: &str = "cardano-cli";
pub const DEFAULT_NETWORK: &str = "mainnet";
pub const DEFAULT_STORAGE_DIR: &str = "storage";

/// Constructor-level options of the facade.
///
/// `network` is the selector token injected as `--<network>` on every
/// network-sensitive call. A token carrying a value, e.g.
/// `testnet-magic 1097911063`, expands to `--testnet-magic 1097911063`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardanoCliConfig {
    pub bin_path: PathBuf,
    pub storage_dir: PathBuf,
    pub network: String,
    pub shelley_genesis: PathBuf,
    /// Upper bound on a single cardano-cli invocation. `None` waits forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl CardanoCliConfig {
    pub fn new(shelley_genesis: impl Into<PathBuf>) -> Self {
        Self {
            bin_path: PathBuf::from(DEFAULT_BIN_PATH),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            network: DEFAULT_NETWORK.to_string(),
            shelley_genesis: shelley_genesis.into(),
            timeout_secs: None,
        }
    }

    pub fn with_bin_path(mut self, bin_path: impl Into<PathBuf>) -> Self {
        self.bin_path = bin_path.into();
        self
    }

    pub fn with_storage_dir(mut self, storage_dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = storage_dir.into();
        self
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = network.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn shelley_genesis(&self) -> &Path {
        &self.shelley_genesis
    }

    /// Network selector rendered as cardano-cli arguments.
    pub fn network_args(&self) -> Vec<String> {
        let mut tokens = self.network.split_whitespace();
        let mut args = Vec::new();
        if let Some(selector) = tokens.next() {
            let selector = selector.trim_start_matches('-');
            args.push(format!("--{selector}"));
        }
        args.extend(tokens.map(str::to_string));
        args
    }

    pub fn validate(&self) -> Result<()> {
        if self.network.trim().trim_start_matches('-').is_empty() {
            return Err(CardanoKitError::Configuration("network selector must not be empty".to_string()));
        }
        if self.shelley_genesis.as_os_str().is_empty() {
            return Err(CardanoKitError::Configuration("shelley genesis path is required".to_string()));
        }
        if self.bin_path.as_os_str().is_empty() {
            return Err(CardanoKitError::Configuration("cardano-cli binary path must not be empty".to_string()));
        }
        if self.timeout_secs == Some(0) {
            return Err(CardanoKitError::Configuration("timeout must be at least one second".to_string()));
        }
        Ok(())
    }
}
