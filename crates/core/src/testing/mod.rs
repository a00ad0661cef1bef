//! Testing utilities and mock implementations.
//!
//! This module provides a scripted [`ProcessRunner`](crate::streamer::ProcessRunner)
//! so streaming and merge operations can be tested without an ffmpeg install.
//!
//! # Example
//!
//! ```rust,ignore
//! use ffstream_core::testing::{fixtures, MockOutcome, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.push_outcomes([MockOutcome::Exit(1), MockOutcome::Success]).await;
//!
//! let streamer = fixtures::streamer(runner.clone());
//! ```

mod mock_runner;

pub use mock_runner::{MockOutcome, MockRunner, RecordedCommand};

/// Test fixtures and helper functions.
pub mod fixtures {
    use super::MockRunner;
    use crate::rtmps::RtmpsConfig;
    use crate::streamer::{StreamOptions, Streamer, StreamerConfig};

    /// Create a streamer backed by the given mock runner.
    pub fn streamer(runner: MockRunner) -> Streamer<MockRunner> {
        Streamer::with_runner(StreamerConfig::default(), runner)
    }

    /// Stream options that retry quickly.
    pub fn fast_retry_options(retry_count: u32) -> StreamOptions {
        StreamOptions {
            retry_count,
            retry_delay_ms: 10,
            ..Default::default()
        }
    }

    /// An RTMPS endpoint with a stream key and no credentials.
    pub fn rtmps_endpoint(server: &str, stream_key: &str) -> RtmpsConfig {
        RtmpsConfig {
            server: server.to_string(),
            stream_key: stream_key.to_string(),
            tls_verify: true,
            ..Default::default()
        }
    }
}
