use std::path::PathBuf;

use super::{AccountArtifact, CardanoCli, KeyPairPaths};
use crate::paths::KeyRole;
use crate::traits::{ArtifactStore, CommandRunner};
use crate::Result;

/// `cardano-cli stake-address ...`
pub struct StakeAddressCommands<'a, R, S> {
    cli: &'a CardanoCli<R, S>,
}

impl<'a, R: CommandRunner, S: ArtifactStore> StakeAddressCommands<'a, R, S> {
    pub(super) fn new(cli: &'a CardanoCli<R, S>) -> Self {
        Self { cli }
    }

    /// Build `<file_name>.stake.addr` from the stake verification key.
    pub async fn build(&self, artifact: &AccountArtifact) -> Result<PathBuf> {
        self.cli.build_address(artifact, KeyRole::Stake, false).await
    }

    /// Generate `<file_name>.stake.vkey` and `<file_name>.stake.skey`.
    pub async fn key_gen(&self, artifact: &AccountArtifact) -> Result<KeyPairPaths> {
        self.cli.generate_key_pair(artifact, KeyRole::Stake).await
    }
}
