//! Serialization of artifact creation.
//!
//! [`PathLocks`] makes the guard check and the write that follows it one
//! critical section per resolved path. [`ArtifactStamps`] hands out strictly
//! increasing millisecond stamps for transaction files so that two builds in
//! the same clock tick never share a file name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct PathLocks {
    inner: Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>,
}

/// Held locks; released on drop.
#[derive(Debug)]
pub struct PathLockGuard {
    _guards: Vec<OwnedMutexGuard<()>>,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, path: &Path) -> Arc<AsyncMutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        map.retain(|_, lock| Arc::strong_count(lock) > 1);
        map.entry(path.to_path_buf()).or_default().clone()
    }

    pub async fn lock(&self, path: &Path) -> PathLockGuard {
        self.lock_all(&[path]).await
    }

    /// Acquire every path in sorted order so overlapping callers cannot deadlock.
    pub async fn lock_all(&self, paths: &[&Path]) -> PathLockGuard {
        let mut sorted: Vec<&Path> = paths.to_vec();
        sorted.sort();
        sorted.dedup();

        let mut guards = Vec::with_capacity(sorted.len());
        for path in sorted {
            guards.push(self.handle(path).lock_owned().await);
        }
        PathLockGuard { _guards: guards }
    }

    pub fn tracked(&self) -> usize {
        self.inner.lock().map(|map| map.len()).unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct ArtifactStamps {
    last: AtomicI64,
}

impl ArtifactStamps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in milliseconds, bumped past the previously issued stamp.
    pub fn next(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }
}
