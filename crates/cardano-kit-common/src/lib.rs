//! cardano-kit Common Library
//!
//! Typed operations over the `cardano-cli` node client. The library turns
//! requests (build an address, build a transaction, list UTXOs) into
//! cardano-cli argument vectors and turns its textual replies back into
//! typed values.
//!
//! ## Architecture
//!
//! - `paths`: storage layout of keys, addresses, transactions and protocol dumps
//! - `guard`: must-exist / must-not-exist checks on artifact paths
//! - `invocation`: argument vector of a single cardano-cli call
//! - `utxo`: decoder for the `query utxo` listing
//! - `transaction`: request types and `transaction` argument assembly
//! - `locks`: per-path serialization and transaction file stamps
//! - `facade`: the public verbs, grouped as `address`, `stake_address`,
//!   `query` and `transaction`
//! - `traits`: the process and filesystem seams implemented by `cardano-kit-sys`

pub mod config;
pub mod error;
pub mod facade;
pub mod guard;
pub mod invocation;
pub mod locks;
pub mod paths;
pub mod traits;
pub mod transaction;
pub mod utxo;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock_provider;

pub use config::CardanoCliConfig;
pub use error::{CardanoKitError, Result};
pub use facade::{
    AccountArtifact, AddressBuildOptions, AddressCommands, CardanoCli, KeyHashOptions, KeyPairPaths, QueryCommands,
    StakeAddressCommands, TransactionCommands,
};
pub use invocation::Invocation;
pub use traits::{ArtifactStore, CommandRunner};
pub use transaction::{BuildRawParams, QueryTip, SubmitOutcome, TxIn, TxOut};
pub use utxo::{Asset, DatumState, Utxo};

pub const CARDANO_KIT_COMMON_VERSION: &str = env!("CARGO_PKG_VERSION");
