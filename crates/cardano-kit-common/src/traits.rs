//! Trait seams between the core and the host system.
//
// The core never spawns processes or touches the filesystem directly.
// `cardano-kit-sys` provides the real implementations, `mock_provider`
// the in-memory ones used by tests.

use std::path::Path;

use async_trait::async_trait;

use crate::invocation::Invocation;
use crate::Result;

/// Runs one cardano-cli invocation to completion and returns its stdout.
///
/// Spawn failures and non-zero exits are both reported as a command failure
/// carrying whatever diagnostic text the process produced.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<String>;

    /// Program name used when rendering command lines for logs.
    fn program(&self) -> &Path {
        Path::new(crate::config::DEFAULT_BIN_PATH)
    }
}

/// Filesystem view used by the existence guard and for directory setup.
pub trait ArtifactStore: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Create the directory and its parents if absent. Idempotent.
    fn ensure_dir(&self, path: &Path) -> Result<()>;
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<T> {
    async fn run(&self, invocation: &Invocation) -> Result<String> {
        (**self).run(invocation).await
    }

    fn program(&self) -> &Path {
        (**self).program()
    }
}

impl<T: ArtifactStore + ?Sized> ArtifactStore for std::sync::Arc<T> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        (**self).ensure_dir(path)
    }
}
