//! Image + audio merging, to a file or straight to an RTMPS endpoint.

use std::path::Path;
use tracing::info;

use super::config::MergeConfig;
use crate::rtmps::{build_rtmps_url, redact_url, RtmpsConfig};
use crate::streamer::{
    ensure_input, ExtraParams, FfmpegRunner, ProcessRunner, StreamOptions, Streamer, StreamerError,
};

/// Combines a still image with an audio track.
#[derive(Debug, Clone)]
pub struct Merger<R = FfmpegRunner> {
    streamer: Streamer<R>,
}

impl<R: ProcessRunner> Merger<R> {
    pub fn new(streamer: Streamer<R>) -> Self {
        Self { streamer }
    }

    pub fn streamer(&self) -> &Streamer<R> {
        &self.streamer
    }

    /// `-loop 1 -i <image> [-stream_loop -1] -i <audio>`
    fn input_args(image: &Path, audio: &Path, config: &MergeConfig) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-loop".to_string(),
            "1".to_string(),
            "-i".to_string(),
            image.to_string_lossy().to_string(),
        ];
        args.extend(config.audio_input_args());
        args.extend(["-i".to_string(), audio.to_string_lossy().to_string()]);
        args
    }

    /// Builds ffmpeg arguments for merging into a file.
    pub fn build_merge_args(
        &self,
        image: &Path,
        audio: &Path,
        output: &Path,
        config: &MergeConfig,
    ) -> Vec<String> {
        let mut args = self.streamer.global_args();
        args.extend(Self::input_args(image, audio, config));

        args.extend([
            "-c:v".to_string(),
            "libx264".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-vf".to_string(),
            config.scale_filter(),
            "-shortest".to_string(),
        ]);
        args.extend(config.duration_args());

        if !config.output_format.is_empty() {
            args.extend(["-f".to_string(), config.output_format.clone()]);
        }

        args.extend(config.extra_params.to_args());
        args.push(output.to_string_lossy().to_string());

        args
    }

    /// Builds ffmpeg arguments for merging and pushing to `url`.
    ///
    /// Extra parameters are layered merge config, then stream options, then
    /// the endpoint's own arguments.
    pub fn build_merge_stream_args(
        &self,
        image: &Path,
        audio: &Path,
        url: &str,
        endpoint: &RtmpsConfig,
        merge: &MergeConfig,
        options: &StreamOptions,
    ) -> Vec<String> {
        let mut args = self.streamer.global_args();
        args.extend(Self::input_args(image, audio, merge));

        args.extend([
            "-c:v".to_string(),
            options.video_codec.clone(),
            "-c:a".to_string(),
            options.audio_codec.clone(),
            "-b:v".to_string(),
            options.bitrate.clone(),
            "-r".to_string(),
            options.frame_rate.to_string(),
            "-vf".to_string(),
            merge.scale_filter(),
            "-f".to_string(),
            "flv".to_string(),
        ]);
        args.extend(merge.duration_args());

        let mut params = ExtraParams::new();
        params.merge(&merge.extra_params);
        params.merge(&options.extra_params);
        endpoint.apply_to(&mut params);
        args.extend(params.to_args());

        args.push(url.to_string());
        args
    }

    /// Merges `image` and `audio` into `output`. Runs once, no retries.
    pub async fn merge_image_and_audio(
        &self,
        image: &Path,
        audio: &Path,
        output: &Path,
        config: &MergeConfig,
    ) -> Result<(), StreamerError> {
        self.streamer.check_available().await?;
        ensure_input(image)?;
        ensure_input(audio)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StreamerError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        info!(
            image = %image.display(),
            audio = %audio.display(),
            output = %output.display(),
            "Merging image and audio"
        );

        let args = self.build_merge_args(image, audio, output, config);
        self.streamer.run_command(args).await
    }

    /// Merges `image` and `audio` and pushes the result to the endpoint,
    /// retrying per `options`.
    pub async fn merge_and_stream_to_rtmps(
        &self,
        image: &Path,
        audio: &Path,
        endpoint: &RtmpsConfig,
        merge: &MergeConfig,
        options: &StreamOptions,
    ) -> Result<(), StreamerError> {
        self.streamer.check_available().await?;
        ensure_input(image)?;
        ensure_input(audio)?;

        let url = build_rtmps_url(endpoint)?;
        info!("Merging and streaming to RTMPS: {}", redact_url(&url));

        let args = self.build_merge_stream_args(image, audio, &url, endpoint, merge, options);
        let policy = options.retry_policy(self.streamer.config().timeout());
        self.streamer.execute(&args, &policy).await
    }
}
