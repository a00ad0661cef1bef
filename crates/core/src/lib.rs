pub mod config;
pub mod merger;
pub mod rtmps;
pub mod streamer;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use merger::{MergeConfig, Merger};
pub use rtmps::{build_rtmps_url, normalize_rtmps_url, RtmpsConfig, RtmpsStreamer};
pub use streamer::{
    execute_with_retry, AttemptEvent, ExtraParams, FfmpegRunner, ProcessRunner, RetryPolicy,
    StreamOptions, Streamer, StreamerConfig, StreamerError,
};
