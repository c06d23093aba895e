use std::path::Path;

use cardano_kit_common::traits::ArtifactStore;
use cardano_kit_common::Result;

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl ArtifactStore for LocalStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.is_dir() {
            log::debug!("creating {}", path.display());
            std::fs::create_dir_all(path)?;
        }
        Ok(())
    }
}
