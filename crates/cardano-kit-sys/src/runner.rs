//! Process-backed [`CommandRunner`].

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use cardano_kit_common::traits::CommandRunner;
use cardano_kit_common::{CardanoKitError, Invocation, Result};
use tokio::process::Command;

/// Spawns the cardano-cli binary once per invocation.
///
/// Arguments go straight to the child without a shell, so values containing
/// spaces (a `--tx-out` carrying native assets) stay a single argument.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), timeout: None }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn output(&self, invocation: &Invocation, command_line: &str) -> Result<Output> {
        let child = Command::new(&self.program)
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CardanoKitError::Spawn(format!("{}: {e}", self.program.display())))?;

        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(output) => Ok(output?),
                Err(_) => Err(CardanoKitError::Timeout { command: command_line.to_string(), secs: limit.as_secs() }),
            },
            None => Ok(child.wait_with_output().await?),
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<String> {
        let command_line = invocation.command_line(&self.program);
        let output = self.output(invocation, &command_line).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = [stderr.trim(), stdout.trim()]
                .into_iter()
                .find(|text| !text.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| output.status.to_string());
            log::debug!("{command_line} exited with {}", output.status);
            return Err(CardanoKitError::Command(format!("{command_line}\n{detail}")));
        }

        Ok(String::from_utf8(output.stdout)?)
    }

    fn program(&self) -> &Path {
        &self.program
    }
}
