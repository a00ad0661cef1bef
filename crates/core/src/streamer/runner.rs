//! Subprocess-backed runner.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::error::StreamerError;
use super::traits::{CommandSpec, OutputMode, ProcessRunner};

/// Runs commands as real child processes via `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegRunner;

impl FfmpegRunner {
    pub fn new() -> Self {
        Self
    }

    fn stdio(mode: OutputMode) -> Stdio {
        match mode {
            OutputMode::Inherit => Stdio::inherit(),
            OutputMode::Null => Stdio::null(),
        }
    }
}

#[async_trait]
impl ProcessRunner for FfmpegRunner {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn run(&self, command: &CommandSpec) -> Result<(), StreamerError> {
        debug!(program = %command.program.display(), args = ?command.args, "Spawning process");

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Self::stdio(command.output))
            .stderr(Self::stdio(command.output))
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| StreamerError::Spawn {
                path: command.program.clone(),
                source,
            })?;

        let result = timeout(command.timeout, child.wait()).await;

        match result {
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => Err(StreamerError::ProcessFailed {
                code: status.code(),
            }),
            Ok(Err(e)) => Err(StreamerError::Io(e)),
            Err(_) => {
                // kill() also reaps the child
                if let Err(e) = child.kill().await {
                    warn!(error = %e, "Failed to kill timed out process");
                }
                Err(StreamerError::Timeout {
                    timeout: command.timeout,
                })
            }
        }
    }
}
