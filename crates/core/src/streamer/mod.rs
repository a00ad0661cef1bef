//! Streamer module: runs ffmpeg invocations with a timeout and retries.
//!
//! This module provides the [`ProcessRunner`] trait, the subprocess-backed
//! [`FfmpegRunner`], the retry loop and the base [`Streamer`] that the
//! RTMPS and merge operations are built on.
//!
//! # Example
//!
//! ```ignore
//! use ffstream_core::streamer::{StreamOptions, Streamer, StreamerConfig};
//!
//! let streamer = Streamer::new(StreamerConfig::default().with_timeout(60));
//!
//! // Fails fast if ffmpeg is missing
//! streamer.check_available().await?;
//!
//! let options = StreamOptions {
//!     retry_count: 5,
//!     retry_delay_ms: 3000,
//!     ..Default::default()
//! };
//! streamer
//!     .stream_file(Path::new("sample.mp4"), "rtmps://live.example.com/app/key", &options)
//!     .await?;
//! ```

mod base;
mod config;
mod error;
mod executor;
mod options;
mod runner;
mod traits;

pub use base::{Streamer, AVAILABILITY_TIMEOUT};
pub(crate) use base::ensure_input;
pub use config::StreamerConfig;
pub use error::StreamerError;
pub use executor::{execute_with_retry, AttemptEvent};
pub use options::{ExtraParams, RetryPolicy, StreamOptions};
pub use runner::FfmpegRunner;
pub use traits::{CommandSpec, OutputMode, ProcessRunner};
