use std::path::{Path, PathBuf};

use super::CardanoCli;
use crate::invocation::Invocation;
use crate::paths::TxFileKind;
use crate::traits::{ArtifactStore, CommandRunner};
use crate::transaction::{
    build_raw_invocation, calculate_min_fee_invocation, default_invalid_hereafter, parse_min_fee, sign_invocation,
    BuildRawParams, SubmitOutcome,
};
use crate::Result;

/// `cardano-cli transaction ...`
pub struct TransactionCommands<'a, R, S> {
    cli: &'a CardanoCli<R, S>,
}

impl<'a, R: CommandRunner, S: ArtifactStore> TransactionCommands<'a, R, S> {
    pub(super) fn new(cli: &'a CardanoCli<R, S>) -> Self {
        Self { cli }
    }

    /// Build an unsigned body into a fresh `transactions/<stamp>-raw.json`.
    ///
    /// Without `invalid_hereafter` the current tip is queried; a failed or
    /// slot-less tip counts as slot 0 rather than failing the build.
    pub async fn build_raw(&self, params: &BuildRawParams) -> Result<PathBuf> {
        let invalid_hereafter = match params.invalid_hereafter {
            Some(bound) => bound,
            None => match self.cli.query().tip().await {
                Ok(tip) => default_invalid_hereafter(Some(&tip)),
                Err(err) => {
                    log::warn!("tip query failed, validity horizon counts from slot 0: {err}");
                    default_invalid_hereafter(None)
                }
            },
        };

        let out_file = self.cli.next_tx_file(TxFileKind::Raw)?;
        self.cli.exec(build_raw_invocation(params, invalid_hereafter, &out_file)).await?;

        log::info!("wrote transaction body {}", out_file.display());
        Ok(out_file)
    }

    /// Minimum fee for a body, assuming one input, one output and two witnesses.
    pub async fn calculate_min_fee(&self, tx_body: &Path) -> Result<u64> {
        self.cli.require_exists(tx_body)?;
        let output = self
            .cli
            .exec(calculate_min_fee_invocation(
                tx_body,
                self.cli.config().shelley_genesis(),
                self.cli.network_args(),
            ))
            .await?;
        parse_min_fee(&output)
    }

    /// Sign a body with every key in order into a fresh `transactions/<stamp>-signed.json`.
    pub async fn sign(&self, tx_body: &Path, signing_keys: &[PathBuf]) -> Result<PathBuf> {
        self.cli.require_exists(tx_body)?;
        for key in signing_keys {
            self.cli.require_exists(key)?;
        }

        let out_file = self.cli.next_tx_file(TxFileKind::Signed)?;
        self.cli.exec(sign_invocation(tx_body, signing_keys, &out_file)).await?;

        log::info!("wrote signed transaction {}", out_file.display());
        Ok(out_file)
    }

    /// Submit a signed transaction, then look up its id.
    ///
    /// A submission failure is an error. A lookup failure after a successful
    /// submission is [`SubmitOutcome::IdUnavailable`]: the transaction has
    /// been handed to the node and must not be resubmitted blindly.
    pub async fn submit(&self, tx_file: &Path) -> Result<SubmitOutcome> {
        self.cli.require_exists(tx_file)?;
        self.cli
            .exec(Invocation::new(["transaction", "submit"]).flag_path("tx-file", tx_file).args_from(self.cli.network_args()))
            .await?;

        let tx_file = tx_file.to_path_buf();
        match self.txid(&tx_file).await {
            Ok(txid) => Ok(SubmitOutcome::Submitted { tx_file, txid }),
            Err(err) => {
                log::warn!("submitted {} but could not read its id: {err}", tx_file.display());
                Ok(SubmitOutcome::IdUnavailable { tx_file, reason: err.to_string() })
            }
        }
    }

    pub async fn txid(&self, tx_file: &Path) -> Result<String> {
        self.cli.require_exists(tx_file)?;
        let output = self.cli.exec(Invocation::new(["transaction", "txid"]).flag_path("tx-file", tx_file)).await?;
        Ok(output.trim().to_string())
    }

    /// Human-readable rendering from cardano-cli, passed through untouched.
    pub async fn view(&self, tx_file: &Path) -> Result<String> {
        self.cli.require_exists(tx_file)?;
        self.cli.exec(Invocation::new(["transaction", "view"]).flag_path("tx-file", tx_file)).await
    }

    pub async fn policy_id(&self, script_file: &Path) -> Result<String> {
        self.cli.require_exists(script_file)?;
        let output = self
            .cli
            .exec(Invocation::new(["transaction", "policyid"]).flag_path("script-file", script_file))
            .await?;
        Ok(output.trim().to_string())
    }
}
