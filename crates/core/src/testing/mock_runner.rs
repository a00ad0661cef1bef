//! Mock process runner for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::streamer::{CommandSpec, ProcessRunner, StreamerError};

/// Scripted result of a single mock run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOutcome {
    /// Zero exit.
    Success,
    /// Non-zero exit with the given code.
    Exit(i32),
    /// Ran past its deadline.
    Timeout,
    /// Program could not be spawned.
    NotFound,
}

/// A recorded run for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCommand {
    /// The command that was run.
    pub command: CommandSpec,
    /// When the run started (tokio clock, so paused-time tests see virtual time).
    pub at: Instant,
    /// What the run returned.
    pub outcome: MockOutcome,
}

/// Mock implementation of the ProcessRunner trait.
///
/// Provides controllable behavior for testing:
/// - Queue outcomes for successive runs
/// - Fall back to a default outcome once the queue is empty
/// - Record every command for assertions
/// - Simulate run time
///
/// # Example
///
/// ```rust,ignore
/// use ffstream_core::testing::{MockOutcome, MockRunner};
///
/// let runner = MockRunner::new();
/// runner.push_outcomes([MockOutcome::Exit(1), MockOutcome::Success]).await;
///
/// let streamer = Streamer::with_runner(StreamerConfig::default(), runner.clone());
/// streamer.stream_file(input, url, &options).await?;
///
/// assert_eq!(runner.run_count().await, 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockRunner {
    /// Recorded runs.
    commands: Arc<RwLock<Vec<RecordedCommand>>>,
    /// Outcomes consumed front to back.
    outcomes: Arc<RwLock<VecDeque<MockOutcome>>>,
    /// Outcome used when the queue is empty.
    default_outcome: Arc<RwLock<MockOutcome>>,
    /// Simulated run duration.
    run_duration: Arc<RwLock<Duration>>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    /// Create a mock runner where every run succeeds.
    pub fn new() -> Self {
        Self {
            commands: Arc::new(RwLock::new(Vec::new())),
            outcomes: Arc::new(RwLock::new(VecDeque::new())),
            default_outcome: Arc::new(RwLock::new(MockOutcome::Success)),
            run_duration: Arc::new(RwLock::new(Duration::ZERO)),
        }
    }

    /// Queue outcomes for the next runs.
    pub async fn push_outcomes(&self, outcomes: impl IntoIterator<Item = MockOutcome>) {
        self.outcomes.write().await.extend(outcomes);
    }

    /// Set the outcome used once queued outcomes run out.
    pub async fn set_default_outcome(&self, outcome: MockOutcome) {
        *self.default_outcome.write().await = outcome;
    }

    /// Set the simulated run duration.
    pub async fn set_run_duration(&self, duration: Duration) {
        *self.run_duration.write().await = duration;
    }

    /// Get all recorded runs.
    pub async fn recorded_commands(&self) -> Vec<RecordedCommand> {
        self.commands.read().await.clone()
    }

    /// Argument lists of all recorded runs, in order.
    pub async fn recorded_args(&self) -> Vec<Vec<String>> {
        self.commands
            .read()
            .await
            .iter()
            .map(|r| r.command.args.clone())
            .collect()
    }

    /// Get the number of runs performed.
    pub async fn run_count(&self) -> usize {
        self.commands.read().await.len()
    }

    /// Clear recorded runs.
    pub async fn clear_recorded(&self) {
        self.commands.write().await.clear();
    }

    async fn next_outcome(&self) -> MockOutcome {
        match self.outcomes.write().await.pop_front() {
            Some(outcome) => outcome,
            None => *self.default_outcome.read().await,
        }
    }
}

#[async_trait]
impl ProcessRunner for MockRunner {
    fn name(&self) -> &str {
        "mock"
    }

    async fn run(&self, command: &CommandSpec) -> Result<(), StreamerError> {
        let outcome = self.next_outcome().await;
        self.commands.write().await.push(RecordedCommand {
            command: command.clone(),
            at: Instant::now(),
            outcome,
        });

        let duration = *self.run_duration.read().await;
        if !duration.is_zero() {
            tokio::time::sleep(duration.min(command.timeout)).await;
        }

        match outcome {
            MockOutcome::Success => Ok(()),
            MockOutcome::Exit(code) => Err(StreamerError::ProcessFailed { code: Some(code) }),
            MockOutcome::Timeout => Err(StreamerError::Timeout {
                timeout: command.timeout,
            }),
            MockOutcome::NotFound => Err(StreamerError::Spawn {
                path: PathBuf::from(&command.program),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
        }
    }
}
