//! Trait definitions for the streamer module.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use super::error::StreamerError;

/// Where a child's stdout/stderr go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Pass through to this process's streams.
    Inherit,
    /// Discard.
    Null,
}

/// One fully-formed invocation of the external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub timeout: Duration,
    pub output: OutputMode,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
            output: OutputMode::Inherit,
        }
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }
}

/// Runs a command once under its deadline.
///
/// Implementations must not leave the child running once `run` returns.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Returns the name of this runner implementation.
    fn name(&self) -> &str;

    /// Runs the command to completion.
    ///
    /// Returns `Ok(())` only on a zero exit status. A run that outlives
    /// `command.timeout` is killed and reported as [`StreamerError::Timeout`].
    async fn run(&self, command: &CommandSpec) -> Result<(), StreamerError>;
}
