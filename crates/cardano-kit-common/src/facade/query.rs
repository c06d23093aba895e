use std::path::PathBuf;

use super::CardanoCli;
use crate::invocation::Invocation;
use crate::traits::{ArtifactStore, CommandRunner};
use crate::transaction::QueryTip;
use crate::utxo::{parse_utxo_listing, Utxo};
use crate::Result;

pub const DEFAULT_PROTOCOL_PARAMETERS_FILE: &str = "protocol-parameters";

/// `cardano-cli query ...`
pub struct QueryCommands<'a, R, S> {
    cli: &'a CardanoCli<R, S>,
}

impl<'a, R: CommandRunner, S: ArtifactStore> QueryCommands<'a, R, S> {
    pub(super) fn new(cli: &'a CardanoCli<R, S>) -> Self {
        Self { cli }
    }

    /// Unspent outputs at `address`. Unrecognised rows are left out.
    pub async fn utxo(&self, address: &str) -> Result<Vec<Utxo>> {
        let output = self
            .cli
            .exec(Invocation::new(["query", "utxo"]).flag("address", address).args_from(self.cli.network_args()))
            .await?;
        Ok(parse_utxo_listing(&output))
    }

    pub async fn tip(&self) -> Result<QueryTip> {
        let output = self.cli.exec(Invocation::new(["query", "tip"]).args_from(self.cli.network_args())).await?;
        QueryTip::parse(&output)
    }

    /// Dump protocol parameters to `protocol/<file_name>.json` and return the path.
    /// The document is not inspected.
    pub async fn protocol_parameters(&self, file_name: Option<&str>) -> Result<PathBuf> {
        let paths = self.cli.paths();
        self.cli.ensure_dir(&paths.protocol_dir())?;

        let out_file = paths.protocol_file(file_name.unwrap_or(DEFAULT_PROTOCOL_PARAMETERS_FILE));
        self.cli
            .exec(
                Invocation::new(["query", "protocol-parameters"])
                    .args_from(self.cli.network_args())
                    .flag_path("out-file", &out_file),
            )
            .await?;
        Ok(out_file)
    }
}
