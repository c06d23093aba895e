//! cardano-kit System Library
//!
//! Binds the cardano-kit core to the host: cardano-cli is spawned as a child
//! process and artifacts live on the local filesystem.

use std::path::PathBuf;

use cardano_kit_common::config::DEFAULT_STORAGE_DIR;
use cardano_kit_common::{CardanoCli, CardanoCliConfig, Result};

pub mod runner;
pub mod store;

pub use runner::ProcessRunner;
pub use store::LocalStore;

pub type SystemCardano = CardanoCli<ProcessRunner, LocalStore>;

/// Build a facade that drives the real binary named in `config`.
pub fn system_cardano(config: CardanoCliConfig) -> Result<SystemCardano> {
    let runner = ProcessRunner::new(&config.bin_path).with_timeout(config.timeout());
    CardanoCli::new(config, runner, LocalStore)
}

/// `~/.cardano-kit/storage`, or `./storage` when there is no home directory.
pub fn default_storage_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".cardano-kit").join(DEFAULT_STORAGE_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
}
