//! Existence preconditions on artifact paths.

use std::path::Path;

use crate::traits::ArtifactStore;
use crate::{CardanoKitError, Result};

/// Fails with [`CardanoKitError::FileNotFound`] unless `path` exists.
pub fn require_exists<S: ArtifactStore + ?Sized>(store: &S, path: &Path) -> Result<()> {
    if store.exists(path) {
        Ok(())
    } else {
        Err(CardanoKitError::FileNotFound(path.display().to_string()))
    }
}

/// Fails with [`CardanoKitError::FileExists`] if `path` exists.
pub fn require_absent<S: ArtifactStore + ?Sized>(store: &S, path: &Path) -> Result<()> {
    if store.exists(path) {
        Err(CardanoKitError::FileExists(path.display().to_string()))
    } else {
        Ok(())
    }
}
