//! The base streamer: availability check, command assembly and execution.

use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::config::StreamerConfig;
use super::error::StreamerError;
use super::executor::{execute_with_retry, AttemptEvent};
use super::options::{RetryPolicy, StreamOptions};
use super::runner::FfmpegRunner;
use super::traits::{CommandSpec, OutputMode, ProcessRunner};
use crate::rtmps::redact_url;

/// Deadline for the `-version` probe.
pub const AVAILABILITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs ffmpeg invocations with a shared tool path and timeout.
///
/// Higher-level operations ([`RtmpsStreamer`](crate::rtmps::RtmpsStreamer),
/// [`Merger`](crate::merger::Merger)) hold one of these rather than
/// duplicating its configuration.
#[derive(Debug, Clone)]
pub struct Streamer<R = FfmpegRunner> {
    config: StreamerConfig,
    runner: R,
    events: Option<mpsc::Sender<AttemptEvent>>,
}

impl Streamer<FfmpegRunner> {
    /// Creates a streamer that spawns real processes.
    pub fn new(config: StreamerConfig) -> Self {
        Self::with_runner(config, FfmpegRunner)
    }

    /// Creates a streamer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(StreamerConfig::default())
    }
}

impl<R: ProcessRunner> Streamer<R> {
    /// Creates a streamer with a custom runner.
    pub fn with_runner(config: StreamerConfig, runner: R) -> Self {
        Self {
            config,
            runner,
            events: None,
        }
    }

    /// Reports attempt progress to `tx` in addition to the log.
    pub fn with_event_sink(mut self, tx: mpsc::Sender<AttemptEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn config(&self) -> &StreamerConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Checks that ffmpeg can be run at all.
    ///
    /// Every streaming and merge operation calls this before doing any work.
    pub async fn check_available(&self) -> Result<(), StreamerError> {
        let command = CommandSpec::new(
            &self.config.path,
            vec!["-version".to_string()],
            AVAILABILITY_TIMEOUT,
        )
        .with_output(OutputMode::Null);

        self.runner
            .run(&command)
            .await
            .map_err(|e| StreamerError::unavailable(&self.config.path, e.to_string()))
    }

    /// Arguments that precede every command.
    pub(crate) fn global_args(&self) -> Vec<String> {
        match &self.config.log_level {
            Some(level) => vec!["-loglevel".to_string(), level.clone()],
            None => Vec::new(),
        }
    }

    /// Builds ffmpeg arguments for pushing `input` to `output` as FLV.
    pub fn build_command(&self, input: &Path, output: &str, options: &StreamOptions) -> Vec<String> {
        let mut args = self.global_args();

        args.extend([
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-c:v".to_string(),
            options.video_codec.clone(),
            "-c:a".to_string(),
            options.audio_codec.clone(),
            "-b:v".to_string(),
            options.bitrate.clone(),
            "-r".to_string(),
            options.frame_rate.to_string(),
            "-s".to_string(),
            options.resolution.clone(),
            // RTMP carries FLV
            "-f".to_string(),
            "flv".to_string(),
        ]);

        args.extend(options.extra_params.to_args());
        args.push(output.to_string());

        args
    }

    /// Pushes a local file to `url`, retrying per `options`.
    pub async fn stream_file(
        &self,
        input: &Path,
        url: &str,
        options: &StreamOptions,
    ) -> Result<(), StreamerError> {
        self.check_available().await?;
        ensure_input(input)?;

        info!(
            input = %input.display(),
            url = %redact_url(url),
            "Streaming file"
        );

        let args = self.build_command(input, url, options);
        self.execute(&args, &options.retry_policy(self.config.timeout()))
            .await
    }

    /// Runs `args` under `policy`, reporting to the event sink if one is set.
    pub async fn execute(&self, args: &[String], policy: &RetryPolicy) -> Result<(), StreamerError> {
        execute_with_retry(
            &self.runner,
            &self.config.path,
            args,
            policy,
            self.events.as_ref(),
        )
        .await
    }

    /// Runs `args` once under the configured timeout.
    pub async fn run_command(&self, args: Vec<String>) -> Result<(), StreamerError> {
        debug!(args = ?args, "Running ffmpeg command");
        let command = CommandSpec::new(&self.config.path, args, self.config.timeout());
        self.runner.run(&command).await
    }
}

/// Fails with `InputNotFound` unless `path` exists.
pub(crate) fn ensure_input(path: &Path) -> Result<(), StreamerError> {
    if !path.exists() {
        return Err(StreamerError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
