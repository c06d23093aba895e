//! In-memory runner and store for tests.
//!
//! [`MockRunner`] records every invocation and answers from canned replies
//! keyed by command (`"query tip"`, `"transaction txid"`, ...). When attached
//! to a [`MockStore`] it also "writes" the files a real cardano-cli would:
//! `--out-file` targets and both key files of a `key-gen`. A gated command
//! parks inside `run` until the test hands out permits, which lets two
//! overlapping requests reach the runner at the same time.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::invocation::Invocation;
use crate::traits::{ArtifactStore, CommandRunner};
use crate::{CardanoKitError, Result};

#[derive(Debug, Clone, Default)]
pub struct MockStore {
    files: Arc<Mutex<BTreeSet<PathBuf>>>,
    dirs: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch(&self, path: impl AsRef<Path>) {
        self.files.lock().unwrap().insert(path.as_ref().to_path_buf());
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.lock().unwrap().contains(path.as_ref())
    }

    pub fn files(&self) -> Vec<PathBuf> {
        self.files.lock().unwrap().iter().cloned().collect()
    }

    pub fn dirs(&self) -> Vec<PathBuf> {
        self.dirs.lock().unwrap().iter().cloned().collect()
    }
}

impl ArtifactStore for MockStore {
    fn exists(&self, path: &Path) -> bool {
        self.contains(path) || self.dirs.lock().unwrap().contains(path)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    responses: Arc<Mutex<HashMap<String, Result<String>>>>,
    calls: Arc<Mutex<Vec<Invocation>>>,
    gates: Arc<Mutex<HashMap<String, Arc<Semaphore>>>>,
    store: Option<MockStore>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialise output files into `store` on every successful call.
    pub fn with_store(store: MockStore) -> Self {
        Self { store: Some(store), ..Self::default() }
    }

    /// Reply with `stdout` to every call of `command` (e.g. `"query tip"`).
    pub fn respond(&self, command: &str, stdout: impl Into<String>) -> &Self {
        self.responses.lock().unwrap().insert(command.to_string(), Ok(stdout.into()));
        self
    }

    /// Fail every call of `command` with a command failure carrying `message`.
    pub fn fail(&self, command: &str, message: impl Into<String>) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .insert(command.to_string(), Err(CardanoKitError::Command(message.into())));
        self
    }

    /// Park every call of `command` until a permit is added to the returned
    /// semaphore. Each call consumes one permit.
    pub fn gate(&self, command: &str) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.gates.lock().unwrap().insert(command.to_string(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, command: &str) -> Vec<Invocation> {
        self.calls().into_iter().filter(|call| call.command_key() == command).collect()
    }

    pub fn last_call(&self) -> Option<Invocation> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn materialise(&self, invocation: &Invocation) {
        let Some(store) = &self.store else { return };
        if let Some(out_file) = invocation.value_of("out-file") {
            store.touch(out_file);
        }
        if invocation.command_key().ends_with("key-gen") {
            for flag in ["verification-key-file", "signing-key-file"] {
                if let Some(path) = invocation.value_of(flag) {
                    store.touch(path);
                }
            }
        }
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, invocation: &Invocation) -> Result<String> {
        self.calls.lock().unwrap().push(invocation.clone());
        let gate = self.gates.lock().unwrap().get(&invocation.command_key()).cloned();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        let reply = self
            .responses
            .lock()
            .unwrap()
            .get(&invocation.command_key())
            .cloned()
            .unwrap_or_else(|| Ok(String::new()));
        if reply.is_ok() {
            self.materialise(invocation);
        }
        reply
    }
}
