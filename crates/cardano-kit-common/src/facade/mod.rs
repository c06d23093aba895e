//! The public operation catalog.
//!
//! [`CardanoCli`] owns the configuration, the artifact layout and the two
//! host seams (a [`CommandRunner`] and an [`ArtifactStore`]). The verbs are
//! grouped the way cardano-cli groups its commands:
//!
//! - [`CardanoCli::address`]: `build`, `key_gen`, `key_hash`
//! - [`CardanoCli::stake_address`]: `build`, `key_gen`
//! - [`CardanoCli::query`]: `utxo`, `tip`, `protocol_parameters`
//! - [`CardanoCli::transaction`]: `build_raw`, `calculate_min_fee`, `sign`,
//!   `submit`, `txid`, `view`, `policy_id`
//!
//! Every verb resolves paths, checks guards, assembles arguments, invokes
//! cardano-cli once (twice for `submit`) and decodes the reply, in that
//! order. Nothing is retried.

mod address;
mod query;
mod stake_address;
mod transaction;

pub use address::{AddressBuildOptions, AddressCommands, KeyHashOptions};
pub use query::QueryCommands;
pub use stake_address::StakeAddressCommands;
pub use transaction::TransactionCommands;

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::CardanoCliConfig;
use crate::guard::{require_absent, require_exists};
use crate::invocation::Invocation;
use crate::locks::{ArtifactStamps, PathLocks};
use crate::paths::{ArtifactKind, ArtifactPaths, KeyRole, TxFileKind};
use crate::traits::{ArtifactStore, CommandRunner};
use crate::Result;

static CLI_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(cardano-cli) ([0-9.]+)").expect("version pattern is valid"));

/// Names a key pair or address inside an account namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountArtifact {
    pub account: String,
    pub file_name: String,
}

impl AccountArtifact {
    pub fn new(account: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self { account: account.into(), file_name: file_name.into() }
    }
}

/// Files written by a key generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPairPaths {
    pub vkey: PathBuf,
    pub skey: PathBuf,
}

pub struct CardanoCli<R, S> {
    config: CardanoCliConfig,
    paths: ArtifactPaths,
    runner: R,
    store: S,
    locks: PathLocks,
    stamps: ArtifactStamps,
}

impl<R: CommandRunner, S: ArtifactStore> CardanoCli<R, S> {
    pub fn new(config: CardanoCliConfig, runner: R, store: S) -> Result<Self> {
        config.validate()?;
        let paths = ArtifactPaths::new(config.storage_dir.clone());
        Ok(Self { config, paths, runner, store, locks: PathLocks::new(), stamps: ArtifactStamps::new() })
    }

    pub fn config(&self) -> &CardanoCliConfig {
        &self.config
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn address(&self) -> AddressCommands<'_, R, S> {
        AddressCommands::new(self)
    }

    pub fn stake_address(&self) -> StakeAddressCommands<'_, R, S> {
        StakeAddressCommands::new(self)
    }

    pub fn query(&self) -> QueryCommands<'_, R, S> {
        QueryCommands::new(self)
    }

    pub fn transaction(&self) -> TransactionCommands<'_, R, S> {
        TransactionCommands::new(self)
    }

    /// Version of the configured binary, parsed from `cardano-cli version`.
    pub async fn cli_version(&self) -> Result<Option<String>> {
        let output = self.exec(Invocation::new(["version"])).await?;
        Ok(CLI_VERSION.captures(&output).and_then(|c| c.get(2)).map(|m| m.as_str().to_string()))
    }

    pub(crate) async fn exec(&self, invocation: Invocation) -> Result<String> {
        log::debug!("exec: {}", invocation.command_line(&self.config.bin_path));
        self.runner.run(&invocation).await
    }

    pub(crate) fn network_args(&self) -> Vec<String> {
        self.config.network_args()
    }

    pub(crate) fn require_exists(&self, path: &Path) -> Result<()> {
        require_exists(&self.store, path)
    }

    pub(crate) fn require_absent(&self, path: &Path) -> Result<()> {
        require_absent(&self.store, path)
    }

    pub(crate) fn ensure_dir(&self, path: &Path) -> Result<()> {
        self.store.ensure_dir(path)
    }

    /// Fresh transaction file name. Stamps only move forward within this
    /// instance and skip names already on disk.
    pub(crate) fn next_tx_file(&self, kind: TxFileKind) -> Result<PathBuf> {
        self.ensure_dir(&self.paths.transactions_dir())?;
        loop {
            let path = self.paths.transaction_file(self.stamps.next(), kind);
            if !self.store.exists(&path) {
                return Ok(path);
            }
            log::debug!("transaction file {} already present, taking next stamp", path.display());
        }
    }

    /// Generate a key pair for `role`. Both files must be absent beforehand.
    pub(crate) async fn generate_key_pair(&self, artifact: &AccountArtifact, role: KeyRole) -> Result<KeyPairPaths> {
        let AccountArtifact { account, file_name } = artifact;
        let vkey = self.paths.account_artifact(account, file_name, ArtifactKind::VerificationKey(role));
        let skey = self.paths.account_artifact(account, file_name, ArtifactKind::SigningKey(role));

        let _lock = self.locks.lock_all(&[vkey.as_path(), skey.as_path()]).await;
        self.require_absent(&vkey)?;
        self.require_absent(&skey)?;

        self.ensure_dir(&self.paths.account_dir(account))?;
        self.exec(
            Invocation::new([role.command_group(), "key-gen"])
                .flag_path("verification-key-file", &vkey)
                .flag_path("signing-key-file", &skey),
        )
        .await?;

        log::info!("generated {} key pair {}", role.as_str(), vkey.display());
        Ok(KeyPairPaths { vkey, skey })
    }

    /// Derive the address file of `role` from its verification key, optionally
    /// combined with the stake verification key of the same name.
    pub(crate) async fn build_address(
        &self,
        artifact: &AccountArtifact,
        role: KeyRole,
        with_stake_key: bool,
    ) -> Result<PathBuf> {
        let AccountArtifact { account, file_name } = artifact;
        let source = self.paths.account_artifact(account, file_name, ArtifactKind::VerificationKey(role));
        self.require_exists(&source)?;

        let stake_vkey = if with_stake_key {
            let stake_vkey =
                self.paths.account_artifact(account, file_name, ArtifactKind::VerificationKey(KeyRole::Stake));
            self.require_exists(&stake_vkey)?;
            Some(stake_vkey)
        } else {
            None
        };

        let out_file = self.paths.account_artifact(account, file_name, ArtifactKind::Address(role));
        let _lock = self.locks.lock(&out_file).await;
        self.require_absent(&out_file)?;

        let source_flag = match role {
            KeyRole::Payment => "payment-verification-key-file",
            KeyRole::Stake => "stake-verification-key-file",
        };
        let mut invocation = Invocation::new([role.command_group(), "build"]).flag_path(source_flag, &source);
        if let Some(stake_vkey) = &stake_vkey {
            invocation = invocation.flag_path("stake-verification-key-file", stake_vkey);
        }
        self.exec(invocation.flag_path("out-file", &out_file).args_from(self.network_args())).await?;

        log::info!("built {} address {}", role.as_str(), out_file.display());
        Ok(out_file)
    }
}
