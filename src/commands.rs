//! Command-line surface of cardano-kit.
//!
//! Every facade verb has a subcommand here. Subcommands that return data take
//! `--raw` to print JSON instead of the coloured tree view.

use std::path::PathBuf;

use cardano_kit_common::config::{DEFAULT_BIN_PATH, DEFAULT_NETWORK};
use cardano_kit_common::{AccountArtifact, AddressBuildOptions, BuildRawParams, CardanoCliConfig, KeyHashOptions, TxIn, TxOut};
use clap::{Args, Parser, Subcommand};

/// Typed front end over the cardano-cli node client
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct KitCommands {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Log filter, e.g. `debug` to print every cardano-cli command line
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path of the cardano-cli binary
    #[arg(long, global = true, env = "CARDANO_CLI_PATH", default_value = DEFAULT_BIN_PATH)]
    pub cardano_cli: PathBuf,
    /// Root of the artifact storage [default: ~/.cardano-kit/storage]
    #[arg(long, global = true, env = "CARDANO_KIT_STORAGE")]
    pub storage_dir: Option<PathBuf>,
    /// Network selector without dashes, e.g. `mainnet` or `testnet-magic 1097911063`
    #[arg(long, global = true, env = "CARDANO_NETWORK", default_value = DEFAULT_NETWORK)]
    pub network: String,
    /// Shelley genesis file, used by fee calculation
    #[arg(long, global = true, env = "CARDANO_SHELLEY_GENESIS", default_value = "shelley-genesis.json")]
    pub shelley_genesis: PathBuf,
    /// Kill cardano-cli invocations running longer than this many seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

impl ConfigArgs {
    pub fn to_config(&self, default_storage: PathBuf) -> CardanoCliConfig {
        CardanoCliConfig {
            bin_path: self.cardano_cli.clone(),
            storage_dir: self.storage_dir.clone().unwrap_or(default_storage),
            network: self.network.clone(),
            shelley_genesis: self.shelley_genesis.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Top-level subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Payment keys and addresses
    #[command(subcommand)]
    Address(AddressCommands),
    /// Stake keys and reward addresses
    #[command(subcommand)]
    StakeAddress(StakeAddressCommands),
    /// Chain queries
    #[command(subcommand)]
    Query(QueryCommands),
    /// Build, sign and submit transactions
    #[command(subcommand)]
    Transaction(TransactionCommands),
    /// Print the version of the configured cardano-cli
    Version {
        #[arg(long)]
        raw: bool,
    },
}

/// Account namespace and artifact base name shared by key and address verbs.
#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    /// Account directory under `accounts/`
    pub account: String,
    /// Base file name, e.g. `k1` for `k1.payment.vkey`
    pub file_name: String,
}

impl From<&ArtifactArgs> for AccountArtifact {
    fn from(args: &ArtifactArgs) -> Self {
        AccountArtifact::new(args.account.clone(), args.file_name.clone())
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AddressCommands {
    /// Build `<file_name>.payment.addr` from an existing payment key
    Build {
        #[command(flatten)]
        artifact: ArtifactArgs,
        /// Include `<file_name>.stake.vkey` as the delegation part
        #[arg(long)]
        with_stake_key: bool,
    },
    /// Generate a payment key pair
    KeyGen {
        #[command(flatten)]
        artifact: ArtifactArgs,
        #[arg(long)]
        raw: bool,
    },
    /// Hash of a payment verification key
    KeyHash {
        #[command(flatten)]
        artifact: ArtifactArgs,
    },
}

impl AddressCommands {
    pub fn build_options(artifact: &ArtifactArgs, with_stake_key: bool) -> AddressBuildOptions {
        let options = AddressBuildOptions::new(artifact.account.clone(), artifact.file_name.clone());
        if with_stake_key {
            options.with_stake_key()
        } else {
            options
        }
    }

    pub fn key_hash_options(artifact: &ArtifactArgs) -> KeyHashOptions {
        KeyHashOptions::new(artifact.account.clone(), artifact.file_name.clone())
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum StakeAddressCommands {
    /// Build `<file_name>.stake.addr` from an existing stake key
    Build {
        #[command(flatten)]
        artifact: ArtifactArgs,
    },
    /// Generate a stake key pair
    KeyGen {
        #[command(flatten)]
        artifact: ArtifactArgs,
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum QueryCommands {
    /// List the UTXOs held by an address
    Utxo {
        address: String,
        #[arg(long)]
        raw: bool,
    },
    /// Current chain tip
    Tip {
        #[arg(long)]
        raw: bool,
    },
    /// Dump protocol parameters to `protocol/<name>.json`
    ProtocolParameters {
        /// File name without extension
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TransactionCommands {
    /// Build an unsigned transaction body
    BuildRaw(BuildRawArgs),
    /// Minimum fee of a transaction body
    CalculateMinFee {
        tx_body_file: PathBuf,
    },
    /// Sign a transaction body with one or more signing keys
    Sign {
        tx_body_file: PathBuf,
        /// Signing key file, repeat for multiple witnesses
        #[arg(long = "signing-key-file", required = true)]
        signing_key_files: Vec<PathBuf>,
    },
    /// Submit a signed transaction and print its id
    Submit {
        tx_file: PathBuf,
        #[arg(long)]
        raw: bool,
    },
    /// Id of a transaction file
    Txid {
        tx_file: PathBuf,
    },
    /// Human-readable rendering of a transaction file
    View {
        tx_file: PathBuf,
    },
    /// Policy id of a minting script
    PolicyId {
        script_file: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct BuildRawArgs {
    /// Input as `<tx hash>#<index>`
    #[arg(long = "tx-in", required = true)]
    pub tx_in: Vec<TxIn>,
    /// Output as `<address>+<lovelace>[+<qty> <asset>]...`
    #[arg(long = "tx-out", required = true)]
    pub tx_out: Vec<TxOut>,
    #[arg(long)]
    pub fee: Option<u64>,
    #[arg(long)]
    pub invalid_before: Option<u64>,
    /// Defaults to the tip slot plus 10000
    #[arg(long)]
    pub invalid_hereafter: Option<u64>,
    #[arg(long = "minting-script-file")]
    pub minting_script: Option<PathBuf>,
    #[arg(long = "metadata-json-file")]
    pub metadata_file: Option<PathBuf>,
    /// Minting expression, e.g. `10 <policy id>.<asset name>`
    #[arg(long)]
    pub mint: Option<String>,
}

impl From<BuildRawArgs> for BuildRawParams {
    fn from(args: BuildRawArgs) -> Self {
        BuildRawParams {
            tx_in: args.tx_in,
            tx_out: args.tx_out,
            fee: args.fee,
            invalid_before: args.invalid_before,
            invalid_hereafter: args.invalid_hereafter,
            minting_script: args.minting_script,
            metadata_file: args.metadata_file,
            mint: args.mint,
        }
    }
}
