//! On-disk layout of generated artifacts.
//!
//! Everything lives under one storage root:
//!
//! ```text
//! <root>/accounts/<account>/<name>.payment.vkey
//! <root>/accounts/<account>/<name>.payment.skey
//! <root>/accounts/<account>/<name>.payment.addr
//! <root>/accounts/<account>/<name>.stake.{vkey,skey,addr}
//! <root>/transactions/<stamp>-raw.json
//! <root>/transactions/<stamp>-signed.json
//! <root>/protocol/<name>.json
//! ```
//!
//! The suffixes are shared with files produced by earlier runs and must not change.

use std::path::{Path, PathBuf};

pub const ACCOUNTS_DIR: &str = "accounts";
pub const TRANSACTIONS_DIR: &str = "transactions";
pub const PROTOCOL_DIR: &str = "protocol";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    Payment,
    Stake,
}

impl KeyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyRole::Payment => "payment",
            KeyRole::Stake => "stake",
        }
    }

    /// cardano-cli command group owning keys of this role.
    pub fn command_group(&self) -> &'static str {
        match self {
            KeyRole::Payment => "address",
            KeyRole::Stake => "stake-address",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    VerificationKey(KeyRole),
    SigningKey(KeyRole),
    Address(KeyRole),
}

impl ArtifactKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            ArtifactKind::VerificationKey(KeyRole::Payment) => ".payment.vkey",
            ArtifactKind::SigningKey(KeyRole::Payment) => ".payment.skey",
            ArtifactKind::Address(KeyRole::Payment) => ".payment.addr",
            ArtifactKind::VerificationKey(KeyRole::Stake) => ".stake.vkey",
            ArtifactKind::SigningKey(KeyRole::Stake) => ".stake.skey",
            ArtifactKind::Address(KeyRole::Stake) => ".stake.addr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxFileKind {
    Raw,
    Signed,
}

impl TxFileKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            TxFileKind::Raw => "-raw.json",
            TxFileKind::Signed => "-signed.json",
        }
    }
}

/// Pure path arithmetic over the storage root. No I/O, no validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    root: PathBuf,
}

impl ArtifactPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn join<I, S>(&self, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut path = self.root.clone();
        for segment in segments {
            path.push(segment.as_ref());
        }
        path
    }

    pub fn account_dir(&self, account: &str) -> PathBuf {
        self.join([ACCOUNTS_DIR, account])
    }

    pub fn account_artifact(&self, account: &str, file_name: &str, kind: ArtifactKind) -> PathBuf {
        self.join([ACCOUNTS_DIR, account, &format!("{file_name}{}", kind.suffix())])
    }

    pub fn transactions_dir(&self) -> PathBuf {
        self.join([TRANSACTIONS_DIR])
    }

    pub fn transaction_file(&self, stamp: i64, kind: TxFileKind) -> PathBuf {
        self.join([TRANSACTIONS_DIR, &format!("{stamp}{}", kind.suffix())])
    }

    pub fn protocol_dir(&self) -> PathBuf {
        self.join([PROTOCOL_DIR])
    }

    pub fn protocol_file(&self, file_name: &str) -> PathBuf {
        self.join([PROTOCOL_DIR, &format!("{file_name}.json")])
    }
}
