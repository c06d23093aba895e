//! Query and transaction verbs against the in-memory runner/store.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use cardano_kit_common::mock_provider::{MockRunner, MockStore};
use cardano_kit_common::{
    Asset, BuildRawParams, CardanoCli, CardanoCliConfig, CardanoKitError, DatumState, SubmitOutcome, TxIn, TxOut,
};

const UTXO_LISTING: &str = "                           TxHash                                 TxIx        Amount
--------------------------------------------------------------------------------------
abcd1234 0 5000000 lovelace + TxOutDatumNone + 10 policy1.assetA
ffee0011     1        1200000 lovelace + 3 policy2.x + 4 policy2.y + TxOutDatumHash
warning: some unrelated line
";

fn setup() -> (CardanoCli<MockRunner, MockStore>, MockRunner, MockStore) {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = MockStore::new();
    let runner = MockRunner::with_store(store.clone());
    let config = CardanoCliConfig::new("/genesis/shelley.json").with_storage_dir("/store");
    let cli = CardanoCli::new(config, runner.clone(), store.clone()).unwrap();
    (cli, runner, store)
}

fn simple_params() -> BuildRawParams {
    BuildRawParams {
        tx_in: vec![TxIn::new("abcd1234", 0)],
        tx_out: vec![TxOut::new("addr_test1qz", 4_800_000).with_asset("policy1.assetA", 10)],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_query_utxo() {
    let (cli, runner, _store) = setup();
    runner.respond("query utxo", UTXO_LISTING);

    let utxos = cli.query().utxo("addr_test1qz").await.unwrap();
    assert_eq!(utxos.len(), 2);
    assert_eq!(utxos[0].tx_hash, "abcd1234");
    assert_eq!(utxos[0].tx_id, 0);
    assert_eq!(utxos[0].lovelace, 5_000_000);
    assert_eq!(utxos[0].tx_datum, DatumState::None);
    assert_eq!(utxos[0].assets, vec![Asset::new("policy1.assetA", 10)]);
    assert_eq!(utxos[1].assets, vec![Asset::new("policy2.x", 3), Asset::new("policy2.y", 4)]);

    let call = runner.last_call().unwrap();
    assert_eq!(call.value_of("address"), Some("addr_test1qz"));
    assert!(call.has_flag("mainnet"));
}

#[tokio::test]
async fn test_query_tip_rejects_malformed_json() {
    let (cli, runner, _store) = setup();
    runner.respond("query tip", "{\"slot\": ");
    assert!(matches!(cli.query().tip().await, Err(CardanoKitError::Serialization(_))));

    runner.respond("query tip", r#"{"epoch":100,"slot":42,"era":"Babbage"}"#);
    let tip = cli.query().tip().await.unwrap();
    assert_eq!(tip.slot, Some(42));
    assert_eq!(tip.era.as_deref(), Some("Babbage"));
}

#[tokio::test]
async fn test_protocol_parameters() {
    let (cli, runner, store) = setup();

    let default = cli.query().protocol_parameters(None).await.unwrap();
    assert_eq!(default, PathBuf::from("/store/protocol/protocol-parameters.json"));
    assert!(store.contains(&default));
    assert!(store.dirs().contains(&PathBuf::from("/store/protocol")));

    let named = cli.query().protocol_parameters(Some("babbage")).await.unwrap();
    assert_eq!(named, PathBuf::from("/store/protocol/babbage.json"));
    let call = runner.last_call().unwrap();
    assert_eq!(call.command_key(), "query protocol-parameters");
    assert!(call.has_flag("mainnet"));
}

#[tokio::test]
async fn test_build_raw_defaults_upper_bound_from_tip() {
    let (cli, runner, store) = setup();
    runner.respond("query tip", r#"{"slot":5000,"epoch":1}"#);

    let body = cli.transaction().build_raw(&simple_params()).await.unwrap();
    assert!(body.starts_with("/store/transactions"));
    assert!(body.to_string_lossy().ends_with("-raw.json"));
    assert!(store.contains(&body));

    let build = runner.calls_for("transaction build-raw").pop().unwrap();
    assert_eq!(build.value_of("invalid-before"), Some("0"));
    assert_eq!(build.value_of("invalid-hereafter"), Some("15000"));
    assert_eq!(build.value_of("fee"), Some("0"));
    assert_eq!(build.values_of("tx-in"), vec!["abcd1234#0"]);
    assert_eq!(build.values_of("tx-out"), vec!["addr_test1qz+4800000+10 policy1.assetA"]);
    assert!(!build.has_flag("mainnet"));
}

#[tokio::test]
async fn test_build_raw_falls_back_to_slot_zero() {
    let (cli, runner, _store) = setup();
    runner.fail("query tip", "connection refused");

    cli.transaction().build_raw(&simple_params()).await.unwrap();
    let build = runner.calls_for("transaction build-raw").pop().unwrap();
    assert_eq!(build.value_of("invalid-hereafter"), Some("10000"));

    runner.respond("query tip", r#"{"epoch":1,"era":"Babbage"}"#);
    cli.transaction().build_raw(&simple_params()).await.unwrap();
    let build = runner.calls_for("transaction build-raw").pop().unwrap();
    assert_eq!(build.value_of("invalid-hereafter"), Some("10000"));
}

#[tokio::test]
async fn test_build_raw_with_explicit_bounds_skips_tip() {
    let (cli, runner, _store) = setup();
    let params = BuildRawParams {
        fee: Some(170_000),
        invalid_before: Some(100),
        invalid_hereafter: Some(2_000),
        mint: Some("10 policy1.assetA".to_string()),
        minting_script: Some(PathBuf::from("/scripts/policy.script")),
        ..simple_params()
    };

    cli.transaction().build_raw(&params).await.unwrap();
    assert!(runner.calls_for("query tip").is_empty());

    let build = runner.last_call().unwrap();
    assert_eq!(build.value_of("invalid-before"), Some("100"));
    assert_eq!(build.value_of("invalid-hereafter"), Some("2000"));
    assert_eq!(build.value_of("fee"), Some("170000"));
    assert_eq!(build.value_of("mint"), Some("10 policy1.assetA"));
    assert_eq!(build.value_of("minting-script-file"), Some("/scripts/policy.script"));
    assert!(!build.has_flag("metadata-json-file"));
}

#[tokio::test]
async fn test_sequential_builds_never_share_a_file() {
    let (cli, _runner, store) = setup();
    let params = BuildRawParams { invalid_hereafter: Some(1), ..simple_params() };

    let mut seen = HashSet::new();
    for _ in 0..50 {
        let body = cli.transaction().build_raw(&params).await.unwrap();
        assert!(seen.insert(body));
    }
    assert_eq!(store.files().len(), 50);
}

#[tokio::test]
async fn test_build_raw_surfaces_command_failure() {
    let (cli, runner, store) = setup();
    runner.fail("transaction build-raw", "Command failed: missing --tx-out");
    let params = BuildRawParams { invalid_hereafter: Some(1), ..simple_params() };

    let err = cli.transaction().build_raw(&params).await.unwrap_err();
    assert!(err.is_command_failure());
    assert!(store.files().is_empty());
}

#[tokio::test]
async fn test_calculate_min_fee() {
    let (cli, runner, store) = setup();
    let body = Path::new("/store/transactions/1-raw.json");

    assert!(cli.transaction().calculate_min_fee(body).await.unwrap_err().is_precondition());

    store.touch(body);
    runner.respond("transaction calculate-min-fee", "174433 Lovelace\n");
    assert_eq!(cli.transaction().calculate_min_fee(body).await.unwrap(), 174_433);

    let call = runner.last_call().unwrap();
    assert_eq!(call.value_of("tx-in-count"), Some("1"));
    assert_eq!(call.value_of("tx-out-count"), Some("1"));
    assert_eq!(call.value_of("witness-count"), Some("2"));
    assert_eq!(call.value_of("genesis"), Some("/genesis/shelley.json"));
    assert!(call.has_flag("mainnet"));

    runner.respond("transaction calculate-min-fee", "");
    assert!(matches!(cli.transaction().calculate_min_fee(body).await, Err(CardanoKitError::Parse(_))));
}

#[tokio::test]
async fn test_sign_then_submit() {
    let (cli, runner, store) = setup();
    let params = BuildRawParams { invalid_hereafter: Some(1), ..simple_params() };
    let body = cli.transaction().build_raw(&params).await.unwrap();

    let keys = vec![
        PathBuf::from("/store/accounts/alice/k1.payment.skey"),
        PathBuf::from("/store/accounts/alice/k1.stake.skey"),
    ];
    let err = cli.transaction().sign(&body, &keys).await.unwrap_err();
    assert!(matches!(err, CardanoKitError::FileNotFound(ref p) if p.ends_with("k1.payment.skey")));

    for key in &keys {
        store.touch(key);
    }
    let signed = cli.transaction().sign(&body, &keys).await.unwrap();
    assert!(signed.to_string_lossy().ends_with("-signed.json"));
    assert_ne!(signed, body);

    let sign = runner.last_call().unwrap();
    assert_eq!(sign.values_of("signing-key-file"), keys.iter().map(|k| k.to_str().unwrap()).collect::<Vec<_>>());

    runner.respond("transaction txid", "9b3c5e7a\n");
    let outcome = cli.transaction().submit(&signed).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Submitted { tx_file: signed.clone(), txid: "9b3c5e7a".to_string() });

    let submit = runner.calls_for("transaction submit").pop().unwrap();
    assert_eq!(submit.value_of("tx-file"), Some(signed.to_str().unwrap()));
    assert!(submit.has_flag("mainnet"));
}

#[tokio::test]
async fn test_submit_reports_missing_id_without_failing() {
    let (cli, runner, store) = setup();
    let signed = PathBuf::from("/store/transactions/7-signed.json");
    store.touch(&signed);
    runner.fail("transaction txid", "interrupted");

    let outcome = cli.transaction().submit(&signed).await.unwrap();
    assert_eq!(outcome.txid(), None);
    assert_eq!(outcome.tx_file(), signed.as_path());
    assert!(matches!(outcome, SubmitOutcome::IdUnavailable { ref reason, .. } if reason.contains("interrupted")));
    assert_eq!(runner.calls_for("transaction submit").len(), 1);
}

#[tokio::test]
async fn test_submit_failure_skips_id_lookup() {
    let (cli, runner, store) = setup();
    let signed = PathBuf::from("/store/transactions/7-signed.json");
    store.touch(&signed);
    runner.fail("transaction submit", "BadInputsUTxO");

    let err = cli.transaction().submit(&signed).await.unwrap_err();
    assert!(err.to_string().contains("BadInputsUTxO"));
    assert!(runner.calls_for("transaction txid").is_empty());
}

#[tokio::test]
async fn test_txid_view_and_policy_id() {
    let (cli, runner, store) = setup();
    let tx = PathBuf::from("/store/transactions/1-signed.json");
    let script = PathBuf::from("/scripts/policy.script");

    assert!(cli.transaction().view(&tx).await.unwrap_err().is_precondition());
    assert!(cli.transaction().policy_id(&script).await.unwrap_err().is_precondition());

    store.touch(&tx);
    store.touch(&script);
    runner.respond("transaction txid", "  abc123  \n");
    runner.respond("transaction view", "auxiliary scripts: null\nfee: 170000 Lovelace\n");
    runner.respond("transaction policyid", "919d4c2c9455016289341b1a14dedf697687af31751170d56a31466e\n");

    assert_eq!(cli.transaction().txid(&tx).await.unwrap(), "abc123");
    assert_eq!(cli.transaction().view(&tx).await.unwrap(), "auxiliary scripts: null\nfee: 170000 Lovelace\n");
    assert_eq!(
        cli.transaction().policy_id(&script).await.unwrap(),
        "919d4c2c9455016289341b1a14dedf697687af31751170d56a31466e"
    );
    assert_eq!(runner.last_call().unwrap().value_of("script-file"), Some("/scripts/policy.script"));
}
