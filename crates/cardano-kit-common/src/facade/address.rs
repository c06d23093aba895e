use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{AccountArtifact, CardanoCli, KeyPairPaths};
use crate::invocation::Invocation;
use crate::paths::{ArtifactKind, KeyRole};
use crate::traits::{ArtifactStore, CommandRunner};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBuildOptions {
    pub account: String,
    pub file_name: String,
    /// Combine with `<file_name>.stake.vkey` to build a delegation-capable address.
    #[serde(default)]
    pub with_stake_key: bool,
}

impl AddressBuildOptions {
    pub fn new(account: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self { account: account.into(), file_name: file_name.into(), with_stake_key: false }
    }

    pub fn with_stake_key(mut self) -> Self {
        self.with_stake_key = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyHashOptions {
    pub account: String,
    pub vkey_file_name: String,
}

impl KeyHashOptions {
    pub fn new(account: impl Into<String>, vkey_file_name: impl Into<String>) -> Self {
        Self { account: account.into(), vkey_file_name: vkey_file_name.into() }
    }
}

/// `cardano-cli address ...`
pub struct AddressCommands<'a, R, S> {
    cli: &'a CardanoCli<R, S>,
}

impl<'a, R: CommandRunner, S: ArtifactStore> AddressCommands<'a, R, S> {
    pub(super) fn new(cli: &'a CardanoCli<R, S>) -> Self {
        Self { cli }
    }

    /// Build `<file_name>.payment.addr` from the payment verification key.
    pub async fn build(&self, options: &AddressBuildOptions) -> Result<PathBuf> {
        let artifact = AccountArtifact::new(options.account.clone(), options.file_name.clone());
        self.cli.build_address(&artifact, KeyRole::Payment, options.with_stake_key).await
    }

    /// Generate `<file_name>.payment.vkey` and `<file_name>.payment.skey`.
    pub async fn key_gen(&self, artifact: &AccountArtifact) -> Result<KeyPairPaths> {
        self.cli.generate_key_pair(artifact, KeyRole::Payment).await
    }

    /// Hash of the payment verification key.
    pub async fn key_hash(&self, options: &KeyHashOptions) -> Result<String> {
        let paths = self.cli.paths();
        let vkey = paths.account_artifact(
            &options.account,
            &options.vkey_file_name,
            ArtifactKind::VerificationKey(KeyRole::Payment),
        );
        self.cli.require_exists(&vkey)?;
        self.cli.ensure_dir(&paths.account_dir(&options.account))?;

        let output = self
            .cli
            .exec(Invocation::new(["address", "key-hash"]).flag_path("payment-verification-key-file", &vkey))
            .await?;
        Ok(output.trim().to_string())
    }
}
