//! Pushing streams to an RTMPS endpoint.

use std::path::Path;
use tracing::info;

use super::config::RtmpsConfig;
use super::endpoint::{build_rtmps_url, redact_url};
use crate::streamer::{
    ExtraParams, FfmpegRunner, ProcessRunner, StreamOptions, Streamer, StreamerError,
};

/// Streams to a single RTMPS endpoint using a shared [`Streamer`].
#[derive(Debug, Clone)]
pub struct RtmpsStreamer<R = FfmpegRunner> {
    streamer: Streamer<R>,
    config: RtmpsConfig,
}

impl<R: ProcessRunner> RtmpsStreamer<R> {
    pub fn new(streamer: Streamer<R>, config: RtmpsConfig) -> Self {
        Self { streamer, config }
    }

    pub fn config(&self) -> &RtmpsConfig {
        &self.config
    }

    pub fn streamer(&self) -> &Streamer<R> {
        &self.streamer
    }

    /// The normalized endpoint URL.
    pub fn url(&self) -> Result<String, StreamerError> {
        build_rtmps_url(&self.config)
    }

    /// Pushes `input` to the endpoint.
    ///
    /// The caller's options are not modified; endpoint arguments are merged
    /// into a copy.
    pub async fn stream_to_rtmps(
        &self,
        input: &Path,
        options: &StreamOptions,
    ) -> Result<(), StreamerError> {
        let url = self.url()?;

        let mut options = options.clone();
        self.config.apply_to(&mut options.extra_params);

        info!("Streaming to RTMPS: {}", redact_url(&url));
        self.streamer.stream_file(input, &url, &options).await
    }

    /// Sends a one second test pattern to the endpoint.
    pub async fn test_connection(&self) -> Result<(), StreamerError> {
        let url = self.url()?;
        self.streamer.check_available().await?;

        let mut args = self.streamer.global_args();
        args.extend(
            [
                "-f",
                "lavfi",
                "-i",
                "testsrc=duration=1:size=320x240:rate=1",
                "-f",
                "flv",
                "-t",
                "1",
            ]
            .map(String::from),
        );
        let mut params = ExtraParams::new();
        self.config.apply_to(&mut params);
        args.extend(params.to_args());
        args.push(url.clone());

        info!("Testing RTMPS connection: {}", redact_url(&url));
        self.streamer.run_command(args).await
    }
}
