//! Decoder for the `cardano-cli query utxo` listing.
//!
//! The listing is human-oriented text:
//!
//! ```text
//!                            TxHash                                 TxIx        Amount
//! --------------------------------------------------------------------------------------
//! 4e3a...9c1f     0        5000000 lovelace + 10 policy1.assetA + TxOutDatumNone
//! ```
//!
//! The first two lines are skipped by position. Every other line either
//! matches the row grammar or is dropped without error; the tool interleaves
//! other text with the rows on some versions. All knowledge of this layout
//! lives in this module.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([a-z0-9]+)\s+([0-9]+)\s+([0-9]+)\s+([a-z]+).*\s+\+\s+(TxOutDatum[a-z]+)")
        .expect("utxo row pattern is valid")
});

static ASSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+\+\s+([0-9]+)\s+([0-9a-z.]+)").expect("utxo asset pattern is valid")
});

/// Datum attachment reported for an output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DatumState {
    None,
    Hash,
    Inline,
    /// Any other `TxOutDatum*` spelling, kept verbatim.
    Other(String),
}

impl DatumState {
    pub fn as_str(&self) -> &str {
        match self {
            DatumState::None => "TxOutDatumNone",
            DatumState::Hash => "TxOutDatumHash",
            DatumState::Inline => "TxOutDatumInline",
            DatumState::Other(spelling) => spelling,
        }
    }
}

impl From<String> for DatumState {
    fn from(spelling: String) -> Self {
        match spelling.as_str() {
            "TxOutDatumNone" => DatumState::None,
            "TxOutDatumHash" => DatumState::Hash,
            "TxOutDatumInline" => DatumState::Inline,
            _ => DatumState::Other(spelling),
        }
    }
}

impl From<DatumState> for String {
    fn from(state: DatumState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for DatumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A native-asset balance: policy/asset identifier and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "type")]
    pub asset_type: String,
    pub quantity: u64,
}

impl Asset {
    pub fn new(asset_type: impl Into<String>, quantity: u64) -> Self {
        Self { asset_type: asset_type.into(), quantity }
    }
}

/// One unspent output as listed by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utxo {
    pub tx_hash: String,
    /// Output index within the creating transaction.
    pub tx_id: u32,
    pub lovelace: u64,
    pub tx_datum: DatumState,
    pub assets: Vec<Asset>,
}

/// Decode a full listing. Rows that do not match are absent from the result.
pub fn parse_utxo_listing(output: &str) -> Vec<Utxo> {
    output.lines().skip(2).filter_map(parse_utxo_row).collect()
}

/// Decode one data row, `None` when it does not follow the row grammar.
pub fn parse_utxo_row(line: &str) -> Option<Utxo> {
    let captures = ROW.captures(line)?;
    let tx_hash = captures.get(1)?.as_str().to_string();
    let tx_id = captures.get(2)?.as_str().parse().ok()?;
    let lovelace = captures.get(3)?.as_str().parse().ok()?;
    let tx_datum = DatumState::from(captures.get(5)?.as_str().to_string());

    Some(Utxo { tx_hash, tx_id, lovelace, tx_datum, assets: parse_assets(line) })
}

/// Every `+ <quantity> <asset>` fragment on the line, left to right.
pub fn parse_assets(line: &str) -> Vec<Asset> {
    ASSET
        .captures_iter(line)
        .filter_map(|fragment| {
            let quantity = fragment.get(1)?.as_str().parse().ok()?;
            let asset_type = fragment.get(2)?.as_str();
            Some(Asset::new(asset_type, quantity))
        })
        .collect()
}
