//! Retry loop around a [`ProcessRunner`].

use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::error::StreamerError;
use super::options::RetryPolicy;
use super::traits::{CommandSpec, ProcessRunner};

/// Progress notices emitted while a command is being retried.
///
/// Attempts are numbered from 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptEvent {
    Started { attempt: u32, total: u32 },
    Failed { attempt: u32, error: String },
    RetryScheduled { next_attempt: u32, delay: Duration },
    Succeeded { attempt: u32 },
}

fn emit(events: Option<&mpsc::Sender<AttemptEvent>>, event: AttemptEvent) {
    if let Some(tx) = events {
        // Non-blocking send
        let _ = tx.try_send(event);
    }
}

/// Runs `program args...` until it exits successfully or the policy is
/// exhausted.
///
/// Attempts are strictly sequential. Every attempt after the first waits
/// `policy.retry_delay` before starting. On exhaustion the most recent
/// attempt's error is returned inside [`StreamerError::ExecutionFailed`].
pub async fn execute_with_retry<R: ProcessRunner + ?Sized>(
    runner: &R,
    program: &Path,
    args: &[String],
    policy: &RetryPolicy,
    events: Option<&mpsc::Sender<AttemptEvent>>,
) -> Result<(), StreamerError> {
    let command = CommandSpec::new(program, args.to_vec(), policy.timeout);
    let total = policy.total_attempts();
    let mut attempt: u32 = 0;

    loop {
        emit(events, AttemptEvent::Started { attempt, total });

        match runner.run(&command).await {
            Ok(()) => {
                if attempt > 0 {
                    info!(attempt = attempt + 1, total, "Attempt succeeded after retry");
                }
                emit(events, AttemptEvent::Succeeded { attempt });
                return Ok(());
            }
            Err(e) => {
                warn!(attempt = attempt + 1, total, error = %e, "Attempt failed");
                emit(
                    events,
                    AttemptEvent::Failed {
                        attempt,
                        error: e.to_string(),
                    },
                );

                if attempt >= policy.retry_count {
                    return Err(StreamerError::ExecutionFailed {
                        attempts: attempt + 1,
                        last_error: Box::new(e),
                    });
                }
            }
        }

        attempt += 1;
        info!(
            "Retrying attempt {}/{} in {:?}",
            attempt, policy.retry_count, policy.retry_delay
        );
        emit(
            events,
            AttemptEvent::RetryScheduled {
                next_attempt: attempt,
                delay: policy.retry_delay,
            },
        );
        tokio::time::sleep(policy.retry_delay).await;
    }
}
