//! Transaction request types and `cardano-cli transaction` argument assembly.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::invocation::{path_arg, Invocation};
use crate::utxo::Asset;
use crate::{CardanoKitError, Result};

/// Slots added to the current tip when no upper validity bound is given.
pub const DEFAULT_TTL_HORIZON: u64 = 10_000;

/// Fixed shape assumed by the minimum-fee estimate.
pub const MIN_FEE_TX_IN_COUNT: u32 = 1;
pub const MIN_FEE_TX_OUT_COUNT: u32 = 1;
pub const MIN_FEE_WITNESS_COUNT: u32 = 2;

/// Reference to an output being spent, rendered as `<hash>#<index>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxIn {
    pub tx_hash: String,
    pub tx_id: u32,
}

impl TxIn {
    pub fn new(tx_hash: impl Into<String>, tx_id: u32) -> Self {
        Self { tx_hash: tx_hash.into(), tx_id }
    }
}

impl fmt::Display for TxIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.tx_hash, self.tx_id)
    }
}

impl FromStr for TxIn {
    type Err = CardanoKitError;

    fn from_str(s: &str) -> Result<Self> {
        let (hash, index) = s
            .split_once('#')
            .ok_or_else(|| CardanoKitError::InvalidParameters(format!("expected <hash>#<index>, got {s}")))?;
        if hash.is_empty() {
            return Err(CardanoKitError::InvalidParameters(format!("missing transaction hash in {s}")));
        }
        Ok(Self::new(hash, index.parse()?))
    }
}

/// Funds sent to one address, rendered as `<address>+<lovelace>[+<qty> <asset>]*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    pub address: String,
    pub lovelace: u64,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl TxOut {
    pub fn new(address: impl Into<String>, lovelace: u64) -> Self {
        Self { address: address.into(), lovelace, assets: Vec::new() }
    }

    pub fn with_asset(mut self, asset_type: impl Into<String>, quantity: u64) -> Self {
        self.assets.push(Asset::new(asset_type, quantity));
        self
    }
}

impl fmt::Display for TxOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.address, self.lovelace)?;
        for asset in &self.assets {
            write!(f, "+{} {}", asset.quantity, asset.asset_type)?;
        }
        Ok(())
    }
}

impl FromStr for TxOut {
    type Err = CardanoKitError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('+');
        let address = parts.next().unwrap_or_default().trim();
        if address.is_empty() {
            return Err(CardanoKitError::InvalidParameters(format!("missing address in {s}")));
        }
        let lovelace = parts
            .next()
            .ok_or_else(|| CardanoKitError::InvalidParameters(format!("missing amount in {s}")))?
            .trim()
            .parse()?;

        let mut out = TxOut::new(address, lovelace);
        for fragment in parts {
            let mut tokens = fragment.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(quantity), Some(asset_type), None) => {
                    out.assets.push(Asset::new(asset_type, quantity.parse()?));
                }
                _ => {
                    return Err(CardanoKitError::InvalidParameters(format!(
                        "expected `<quantity> <asset>` fragment, got `{fragment}`"
                    )))
                }
            }
        }
        Ok(out)
    }
}

/// Options of `transaction build-raw`. Unset values take the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRawParams {
    pub tx_in: Vec<TxIn>,
    pub tx_out: Vec<TxOut>,
    /// Defaults to 0.
    pub fee: Option<u64>,
    /// Defaults to 0.
    pub invalid_before: Option<u64>,
    /// Defaults to tip slot + [`DEFAULT_TTL_HORIZON`].
    pub invalid_hereafter: Option<u64>,
    pub minting_script: Option<PathBuf>,
    pub metadata_file: Option<PathBuf>,
    /// Minting expression passed through to `--mint`.
    pub mint: Option<String>,
}

/// `cardano-cli query tip` reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTip {
    #[serde(default)]
    pub epoch: Option<u64>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub slot: Option<u64>,
    #[serde(default)]
    pub block: Option<u64>,
    #[serde(default)]
    pub era: Option<String>,
    #[serde(default)]
    pub sync_progress: Option<String>,
}

impl QueryTip {
    /// Malformed JSON is an error, unlike UTXO rows.
    pub fn parse(output: &str) -> Result<Self> {
        Ok(serde_json::from_str(output.trim())?)
    }
}

/// Upper validity bound when the caller gave none: tip slot plus the fixed
/// horizon, counting from slot 0 if the tip is unavailable.
pub fn default_invalid_hereafter(tip: Option<&QueryTip>) -> u64 {
    tip.and_then(|tip| tip.slot).unwrap_or(0).saturating_add(DEFAULT_TTL_HORIZON)
}

/// Arguments of `transaction build-raw` with the upper bound already resolved.
pub fn build_raw_invocation(params: &BuildRawParams, invalid_hereafter: u64, out_file: &Path) -> Invocation {
    let mut invocation = Invocation::new(["transaction", "build-raw"]);
    for output in &params.tx_out {
        invocation = invocation.flag("tx-out", output.to_string());
    }
    for input in &params.tx_in {
        invocation = invocation.flag("tx-in", input.to_string());
    }
    invocation
        .flag("invalid-before", params.invalid_before.unwrap_or(0).to_string())
        .flag("invalid-hereafter", invalid_hereafter.to_string())
        .flag("fee", params.fee.unwrap_or(0).to_string())
        .flag_opt("minting-script-file", params.minting_script.as_deref().map(path_arg))
        .flag_opt("metadata-json-file", params.metadata_file.as_deref().map(path_arg))
        .flag_opt("mint", params.mint.clone())
        .flag_path("out-file", out_file)
}

pub fn calculate_min_fee_invocation(tx_body: &Path, shelley_genesis: &Path, network_args: Vec<String>) -> Invocation {
    Invocation::new(["transaction", "calculate-min-fee"])
        .flag_path("tx-body-file", tx_body)
        .flag("tx-in-count", MIN_FEE_TX_IN_COUNT.to_string())
        .flag("tx-out-count", MIN_FEE_TX_OUT_COUNT.to_string())
        .flag("witness-count", MIN_FEE_WITNESS_COUNT.to_string())
        .flag_path("genesis", shelley_genesis)
        .args_from(network_args)
}

/// The fee is the leading token of the reply, e.g. `176281 Lovelace`.
pub fn parse_min_fee(output: &str) -> Result<u64> {
    let token = output
        .split_whitespace()
        .next()
        .ok_or_else(|| CardanoKitError::Parse("empty calculate-min-fee output".to_string()))?;
    Ok(token.parse()?)
}

pub fn sign_invocation(tx_body: &Path, signing_keys: &[PathBuf], out_file: &Path) -> Invocation {
    let mut invocation = Invocation::new(["transaction", "sign"]).flag_path("tx-body-file", tx_body);
    for key in signing_keys {
        invocation = invocation.flag_path("signing-key-file", key);
    }
    invocation.flag_path("out-file", out_file)
}

/// Result of [`submit`](crate::facade::TransactionCommands::submit).
///
/// Submission and id lookup are two separate cardano-cli calls. Once the
/// first succeeds the transaction is on its way regardless of the second,
/// so a failed lookup is reported here instead of as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SubmitOutcome {
    Submitted { tx_file: PathBuf, txid: String },
    IdUnavailable { tx_file: PathBuf, reason: String },
}

impl SubmitOutcome {
    pub fn txid(&self) -> Option<&str> {
        match self {
            SubmitOutcome::Submitted { txid, .. } => Some(txid),
            SubmitOutcome::IdUnavailable { .. } => None,
        }
    }

    pub fn tx_file(&self) -> &Path {
        match self {
            SubmitOutcome::Submitted { tx_file, .. } | SubmitOutcome::IdUnavailable { tx_file, .. } => tx_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_in_round_trip() {
        let input: TxIn = "abcd#3".parse().unwrap();
        assert_eq!(input, TxIn::new("abcd", 3));
        assert_eq!(input.to_string(), "abcd#3");
        assert!("abcd".parse::<TxIn>().is_err());
        assert!("#1".parse::<TxIn>().is_err());
        assert!("abcd#x".parse::<TxIn>().is_err());
    }

    #[test]
    fn test_tx_out_rendering() {
        let out = TxOut::new("addr_test1", 2_000_000).with_asset("policy.a", 10).with_asset("policy.b", 1);
        assert_eq!(out.to_string(), "addr_test1+2000000+10 policy.a+1 policy.b");
        assert_eq!(TxOut::new("addr1", 5).to_string(), "addr1+5");
    }

    #[test]
    fn test_tx_out_parsing() {
        let out: TxOut = "addr1+1500000+10 policy.a + 3 policy.b".parse().unwrap();
        assert_eq!(out, TxOut::new("addr1", 1_500_000).with_asset("policy.a", 10).with_asset("policy.b", 3));
        assert!("addr1".parse::<TxOut>().is_err());
        assert!("addr1+5+10".parse::<TxOut>().is_err());
        assert!("+5".parse::<TxOut>().is_err());
    }

    #[test]
    fn test_build_raw_defaults() {
        let params = BuildRawParams {
            tx_in: vec![TxIn::new("aa", 0), TxIn::new("aa", 0)],
            tx_out: vec![TxOut::new("addr1", 1000).with_asset("p.x", 5)],
            ..Default::default()
        };
        let inv = build_raw_invocation(&params, 10_000, Path::new("/s/transactions/1-raw.json"));
        assert_eq!(inv.command_key(), "transaction build-raw");
        assert_eq!(inv.values_of("tx-out"), vec!["addr1+1000+5 p.x"]);
        assert_eq!(inv.values_of("tx-in"), vec!["aa#0", "aa#0"]);
        assert_eq!(inv.value_of("invalid-before"), Some("0"));
        assert_eq!(inv.value_of("invalid-hereafter"), Some("10000"));
        assert_eq!(inv.value_of("fee"), Some("0"));
        assert!(!inv.has_flag("minting-script-file"));
        assert!(!inv.has_flag("metadata-json-file"));
        assert!(!inv.has_flag("mint"));
        assert_eq!(inv.value_of("out-file"), Some("/s/transactions/1-raw.json"));
    }

    #[test]
    fn test_build_raw_extensions() {
        let params = BuildRawParams {
            tx_in: vec![TxIn::new("bb", 1)],
            tx_out: vec![TxOut::new("addr1", 1000)],
            fee: Some(180_000),
            invalid_before: Some(5),
            minting_script: Some(PathBuf::from("policy.script")),
            metadata_file: Some(PathBuf::from("meta.json")),
            mint: Some("1 abc.token".to_string()),
            ..Default::default()
        };
        let inv = build_raw_invocation(&params, 777, Path::new("out.json"));
        assert_eq!(inv.value_of("fee"), Some("180000"));
        assert_eq!(inv.value_of("invalid-before"), Some("5"));
        assert_eq!(inv.value_of("invalid-hereafter"), Some("777"));
        assert_eq!(inv.value_of("minting-script-file"), Some("policy.script"));
        assert_eq!(inv.value_of("metadata-json-file"), Some("meta.json"));
        assert_eq!(inv.value_of("mint"), Some("1 abc.token"));
    }

    #[test]
    fn test_default_invalid_hereafter() {
        let tip = QueryTip { slot: Some(1234), ..Default::default() };
        assert_eq!(default_invalid_hereafter(Some(&tip)), 11_234);
        assert_eq!(default_invalid_hereafter(Some(&QueryTip::default())), 10_000);
        assert_eq!(default_invalid_hereafter(None), 10_000);
    }

    #[test]
    fn test_query_tip_parse() {
        let tip = QueryTip::parse(
            r#"{"block":8000000,"epoch":420,"era":"Babbage","hash":"ab12","slot":99000000,"syncProgress":"100.00"}"#,
        )
        .unwrap();
        assert_eq!(tip.slot, Some(99_000_000));
        assert_eq!(tip.sync_progress.as_deref(), Some("100.00"));
        assert!(matches!(QueryTip::parse("not json"), Err(CardanoKitError::Serialization(_))));
    }

    #[test]
    fn test_min_fee() {
        let inv = calculate_min_fee_invocation(Path::new("body.json"), Path::new("g.json"), vec!["--mainnet".into()]);
        assert_eq!(inv.value_of("tx-in-count"), Some("1"));
        assert_eq!(inv.value_of("tx-out-count"), Some("1"));
        assert_eq!(inv.value_of("witness-count"), Some("2"));
        assert_eq!(inv.value_of("genesis"), Some("g.json"));
        assert_eq!(inv.args().last().map(String::as_str), Some("--mainnet"));

        assert_eq!(parse_min_fee("176281 Lovelace\n").unwrap(), 176_281);
        assert!(parse_min_fee("").is_err());
        assert!(parse_min_fee("Lovelace").is_err());
    }

    #[test]
    fn test_sign_invocation() {
        let keys = vec![PathBuf::from("a.skey"), PathBuf::from("b.skey")];
        let inv = sign_invocation(Path::new("raw.json"), &keys, Path::new("signed.json"));
        assert_eq!(inv.values_of("signing-key-file"), vec!["a.skey", "b.skey"]);
        assert_eq!(inv.value_of("out-file"), Some("signed.json"));
    }
}
