//! RTMPS endpoint handling.
//!
//! Builds canonical `rtmps://` URLs from loosely written server addresses and
//! pushes streams to them through a [`Streamer`](crate::streamer::Streamer).

mod config;
mod endpoint;
mod streamer;

pub use config::{RtmpsConfig, TLS_VERIFY_OFF_ARG};
pub use endpoint::{build_rtmps_url, normalize_rtmps_url, redact_url};
pub use streamer::RtmpsStreamer;
