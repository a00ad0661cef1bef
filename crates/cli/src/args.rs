use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ffstream_core::{Config, MergeConfig, RtmpsConfig, StreamOptions};

/// Default config file, used only when present.
pub const DEFAULT_CONFIG_PATH: &str = "ffstream.toml";

#[derive(Parser, Debug)]
#[command(author, version, about = "Stream and merge media to RTMPS with ffmpeg", long_about = None)]
pub struct Cli {
    /// Config file (TOML). Must exist when given explicitly.
    #[arg(short, long, global = true, env = "FFSTREAM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the ffmpeg binary
    #[arg(long, global = true)]
    pub ffmpeg: Option<PathBuf>,

    /// Per-attempt timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that ffmpeg is installed and runs
    Check,

    /// Print the normalized RTMPS URL
    Url {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },

    /// Stream a local file to an RTMPS endpoint
    Stream {
        input: PathBuf,
        #[command(flatten)]
        endpoint: EndpointArgs,
        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Merge an image and an audio track into a video file
    Merge {
        image: PathBuf,
        audio: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        merge: MergeArgs,
    },

    /// Merge an image and an audio track and stream the result
    MergeStream {
        image: PathBuf,
        audio: PathBuf,
        #[command(flatten)]
        endpoint: EndpointArgs,
        #[command(flatten)]
        merge: MergeArgs,
        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Push a one second test pattern to the endpoint
    TestConnection {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },

    /// Print the effective configuration with secrets redacted
    ShowConfig,
}

/// Endpoint flags; each overrides the `[rtmps]` config section.
#[derive(Args, Debug, Default, Clone)]
pub struct EndpointArgs {
    /// RTMPS server, e.g. live.example.com/app
    #[arg(long)]
    pub server: Option<String>,

    /// Stream key
    #[arg(long)]
    pub key: Option<String>,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long, env = "FFSTREAM_RTMPS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Pass `-rtmp_conn S:0` to ffmpeg
    #[arg(long)]
    pub no_tls_verify: bool,
}

impl EndpointArgs {
    pub fn resolve(&self, base: Option<&RtmpsConfig>) -> RtmpsConfig {
        let mut endpoint = base.cloned().unwrap_or_default();
        if let Some(server) = &self.server {
            endpoint.server = server.clone();
        }
        if let Some(key) = &self.key {
            endpoint.stream_key = key.clone();
        }
        if let Some(username) = &self.username {
            endpoint.username = username.clone();
        }
        if let Some(password) = &self.password {
            endpoint.password = password.clone();
        }
        if self.no_tls_verify {
            endpoint.tls_verify = false;
        }
        endpoint
    }
}

/// Encoding and retry flags; each overrides the `[stream]` config section.
#[derive(Args, Debug, Default, Clone)]
pub struct StreamArgs {
    /// Video bitrate, e.g. 3000k
    #[arg(long)]
    pub bitrate: Option<String>,

    #[arg(long)]
    pub frame_rate: Option<u32>,

    /// Output size, WIDTHxHEIGHT
    #[arg(long)]
    pub resolution: Option<String>,

    /// Retries after the first attempt
    #[arg(long)]
    pub retries: Option<u32>,

    /// Pause before each retry, in milliseconds
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,
}

impl StreamArgs {
    pub fn resolve(&self, base: &StreamOptions) -> StreamOptions {
        let mut options = base.clone();
        if let Some(bitrate) = &self.bitrate {
            options.bitrate = bitrate.clone();
        }
        if let Some(frame_rate) = self.frame_rate {
            options.frame_rate = frame_rate;
        }
        if let Some(resolution) = &self.resolution {
            options.resolution = resolution.clone();
        }
        if let Some(retries) = self.retries {
            options.retry_count = retries;
        }
        if let Some(delay) = self.retry_delay_ms {
            options.retry_delay_ms = delay;
        }
        options
    }
}

/// Merge flags; each overrides the `[merge]` config section.
#[derive(Args, Debug, Default, Clone)]
pub struct MergeArgs {
    /// How long the image is shown, in seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// Scale filter size, W:H
    #[arg(long)]
    pub scale: Option<String>,

    /// Play the audio once instead of looping it
    #[arg(long)]
    pub no_loop: bool,
}

impl MergeArgs {
    pub fn resolve(&self, base: &MergeConfig) -> MergeConfig {
        let mut merge = base.clone();
        if let Some(duration) = self.duration {
            merge.image_duration_secs = duration;
        }
        if let Some(scale) = &self.scale {
            merge.image_scale = scale.clone();
        }
        if self.no_loop {
            merge.audio_loop = false;
        }
        merge
    }
}

impl Cli {
    /// Applies the global flags to a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.ffmpeg {
            config.ffmpeg.path = path.clone();
        }
        if let Some(timeout) = self.timeout {
            config.ffmpeg.timeout_secs = timeout;
        }
    }
}
