//! Human-readable rendering of cardano-kit results.

use std::path::Path;

use cardano_kit_common::{DatumState, KeyPairPaths, QueryTip, SubmitOutcome, Utxo};
use colored::*;
use termtree::Tree;

pub fn print_utxos(address: &str, utxos: &[Utxo]) {
    let root = Tree::new(format!("💰 UTXOs at {address}")).with_leaves(utxo_trees(utxos));
    println!("{root}");
    if utxos.is_empty() {
        println!("{}", "No UTXOs found".yellow());
    }
}

fn utxo_trees(utxos: &[Utxo]) -> Vec<Tree<String>> {
    let mut trees = Vec::new();
    for utxo in utxos {
        let mut utxo_tree = Tree::new(format!("{} {}#{}", "Input:".bold(), utxo.tx_hash, utxo.tx_id));
        utxo_tree.push(Tree::new(format!("{} {}", "Lovelace:".bold(), utxo.lovelace)));
        let datum = match &utxo.tx_datum {
            DatumState::None => utxo.tx_datum.to_string().dimmed(),
            other => other.to_string().cyan(),
        };
        utxo_tree.push(Tree::new(format!("{} {}", "Datum:".bold(), datum)));
        if !utxo.assets.is_empty() {
            let assets = utxo
                .assets
                .iter()
                .map(|asset| Tree::new(format!("{} {}", asset.quantity, asset.asset_type.green())));
            utxo_tree.push(Tree::new(format!("{}", "Assets:".bold())).with_leaves(assets));
        }
        trees.push(utxo_tree);
    }
    trees
}

pub fn print_tip(tip: &QueryTip) {
    let mut root = Tree::new("⛓️  Chain Tip".to_string());
    let fields = [
        ("Era:", tip.era.clone()),
        ("Epoch:", tip.epoch.map(|v| v.to_string())),
        ("Slot:", tip.slot.map(|v| v.to_string())),
        ("Block:", tip.block.map(|v| v.to_string())),
        ("Hash:", tip.hash.clone()),
        ("Sync Progress:", tip.sync_progress.as_ref().map(|p| format!("{p}%"))),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            root.push(Tree::new(format!("{} {}", label.bold(), value)));
        }
    }
    println!("{root}");
}

pub fn print_key_pair(keys: &KeyPairPaths) {
    let root = Tree::new(format!("🔑 {}", "Key pair generated".green())).with_leaves([
        Tree::new(format!("{} {}", "Verification key:".bold(), keys.vkey.display())),
        Tree::new(format!("{} {}", "Signing key:".bold(), keys.skey.display())),
    ]);
    println!("{root}");
}

pub fn print_artifact(label: &str, path: &Path) {
    println!("{} {} {}", "✅".green(), label.bold(), path.display());
}

pub fn print_submit_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Submitted { tx_file, txid } => {
            let root = Tree::new(format!("🚀 {}", "Transaction submitted".green())).with_leaves([
                Tree::new(format!("{} {}", "TXID:".bold(), txid)),
                Tree::new(format!("{} {}", "File:".bold(), tx_file.display())),
            ]);
            println!("{root}");
        }
        SubmitOutcome::IdUnavailable { tx_file, reason } => {
            let root = Tree::new(format!("⚠️  {}", "Transaction submitted, id unavailable".yellow())).with_leaves([
                Tree::new(format!("{} {}", "File:".bold(), tx_file.display())),
                Tree::new(format!("{} {}", "Reason:".bold(), reason.red())),
                Tree::new(format!("{}", "Do not resubmit before checking the address UTXOs".dimmed())),
            ]);
            println!("{root}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardano_kit_common::Asset;

    #[test]
    fn test_utxo_tree_lists_assets() {
        colored::control::set_override(false);
        let utxos = vec![Utxo {
            tx_hash: "abcd".to_string(),
            tx_id: 1,
            lovelace: 2_000_000,
            tx_datum: DatumState::Hash,
            assets: vec![Asset::new("policy.token", 7)],
        }];
        let rendered = utxo_trees(&utxos)[0].to_string();
        assert!(rendered.contains("Input: abcd#1"));
        assert!(rendered.contains("Lovelace: 2000000"));
        assert!(rendered.contains("Datum: TxOutDatumHash"));
        assert!(rendered.contains("7 policy.token"));
    }
}
