//! Merging a still image with an audio track.
//!
//! # Example
//!
//! ```ignore
//! use ffstream_core::merger::{MergeConfig, Merger};
//! use ffstream_core::streamer::Streamer;
//!
//! let merger = Merger::new(Streamer::with_defaults());
//! let config = MergeConfig {
//!     image_duration_secs: 30.0,
//!     ..Default::default()
//! };
//! merger
//!     .merge_image_and_audio(
//!         Path::new("background.jpg"),
//!         Path::new("music.mp3"),
//!         Path::new("output/video.mp4"),
//!         &config,
//!     )
//!     .await?;
//! ```

mod config;
mod merge;

pub use config::MergeConfig;
pub use merge::Merger;
