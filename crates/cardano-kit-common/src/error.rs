//! Error type shared by every cardano-kit crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardanoKitError {
    /// A required artifact is missing.
    #[error("File not found {0}. abort")]
    FileNotFound(String),
    /// An artifact that is about to be generated is already on disk.
    #[error("File exists {0}. abort")]
    FileExists(String),
    #[error("Command failed: {0}")]
    Command(String),
    #[error("Failed to spawn command: {0}")]
    Spawn(String),
    #[error("Command timed out after {secs}s: {command}")]
    Timeout { command: String, secs: u64 },
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CardanoKitError {
    /// True for guard failures, which are raised before cardano-cli is invoked.
    pub fn is_precondition(&self) -> bool {
        matches!(self, CardanoKitError::FileNotFound(_) | CardanoKitError::FileExists(_))
    }

    /// True for failures reported by (or while launching) the external binary.
    pub fn is_command_failure(&self) -> bool {
        matches!(
            self,
            CardanoKitError::Command(_) | CardanoKitError::Spawn(_) | CardanoKitError::Timeout { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, CardanoKitError>;

impl From<std::io::Error> for CardanoKitError {
    fn from(err: std::io::Error) -> Self {
        CardanoKitError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CardanoKitError {
    fn from(err: serde_json::Error) -> Self {
        CardanoKitError::Serialization(err.to_string())
    }
}

impl From<core::num::ParseIntError> for CardanoKitError {
    fn from(err: core::num::ParseIntError) -> Self {
        CardanoKitError::Parse(format!("Failed to parse integer: {err}"))
    }
}

impl From<std::string::FromUtf8Error> for CardanoKitError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        CardanoKitError::Parse(err.to_string())
    }
}
