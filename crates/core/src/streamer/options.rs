//! Per-operation options for streaming and retrying.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ordered ffmpeg flag/value overrides appended to a command line.
///
/// Pairs are emitted in insertion order. Inserting a flag that is already
/// present replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraParams(Vec<(String, String)>);

impl ExtraParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a flag.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder form of [`ExtraParams::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts every pair of `other`, in order.
    pub fn merge(&mut self, other: &ExtraParams) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattens the pairs into argv order: `key value key value ...`.
    pub fn to_args(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|(k, v)| [k.clone(), v.clone()])
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtraParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Encoding and retry options for pushing a stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamOptions {
    /// Video encoder.
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Audio encoder.
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Video bitrate in ffmpeg notation (e.g. "2000k").
    #[serde(default = "default_bitrate")]
    pub bitrate: String,

    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Output frame size, `WIDTHxHEIGHT`.
    #[serde(default = "default_resolution")]
    pub resolution: String,

    #[serde(default)]
    pub extra_params: ExtraParams,

    /// Retries after the first attempt.
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Pause before each retry in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_bitrate() -> String {
    "2000k".to_string()
}

fn default_frame_rate() -> u32 {
    25
}

fn default_resolution() -> String {
    "1920x1080".to_string()
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    5000
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            bitrate: default_bitrate(),
            frame_rate: default_frame_rate(),
            resolution: default_resolution(),
            extra_params: ExtraParams::new(),
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl StreamOptions {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Combines these options with a per-attempt timeout.
    pub fn retry_policy(&self, timeout: Duration) -> RetryPolicy {
        RetryPolicy {
            timeout,
            retry_count: self.retry_count,
            retry_delay: self.retry_delay(),
        }
    }
}

/// How many times to run a command, how long each run may take, and how long
/// to wait between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub retry_count: u32,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    /// A policy that runs exactly once.
    pub fn single(timeout: Duration) -> Self {
        Self {
            timeout,
            retry_count: 0,
            retry_delay: Duration::ZERO,
        }
    }

    pub fn total_attempts(&self) -> u32 {
        self.retry_count.saturating_add(1)
    }
}
