//! RTMPS endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::streamer::ExtraParams;

/// Flag and value appended when TLS verification is turned off.
///
/// This is passed through to ffmpeg's RTMP protocol options untouched. Its
/// effect on certificate checking is ffmpeg's business; nothing here relies
/// on it actually disabling verification.
pub const TLS_VERIFY_OFF_ARG: (&str, &str) = ("-rtmp_conn", "S:0");

/// Where and how to push an RTMPS stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtmpsConfig {
    /// Server address, with or without scheme (e.g. "live.example.com/app").
    pub server: String,

    #[serde(default)]
    pub stream_key: String,

    /// Only used when `password` is also set.
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Extra ffmpeg arguments for this endpoint.
    #[serde(default)]
    pub extra_args: ExtraParams,
}

fn default_tls_verify() -> bool {
    true
}

impl Default for RtmpsConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            stream_key: String::new(),
            username: String::new(),
            password: String::new(),
            tls_verify: default_tls_verify(),
            extra_args: ExtraParams::new(),
        }
    }
}

impl RtmpsConfig {
    pub fn new(server: impl Into<String>, stream_key: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            stream_key: stream_key.into(),
            ..Default::default()
        }
    }

    /// Sets username and password.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Adds this endpoint's arguments to `params`.
    ///
    /// Endpoint `extra_args` override same-named flags already present. With
    /// TLS verification off, [`TLS_VERIFY_OFF_ARG`] is added last.
    pub fn apply_to(&self, params: &mut ExtraParams) {
        params.merge(&self.extra_args);
        if !self.tls_verify {
            let (key, value) = TLS_VERIFY_OFF_ARG;
            params.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_verifies_tls() {
        let config = RtmpsConfig::default();
        assert!(config.tls_verify);
        assert!(config.extra_args.is_empty());
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: RtmpsConfig = toml::from_str(r#"server = "live.example.com/app""#).unwrap();
        assert_eq!(config.server, "live.example.com/app");
        assert!(config.stream_key.is_empty());
        assert!(config.tls_verify);
    }

    #[test]
    fn test_apply_to_with_tls_verify() {
        let config = RtmpsConfig {
            extra_args: ExtraParams::new().with("-preset", "ultrafast"),
            ..RtmpsConfig::new("host/app", "key")
        };
        let mut params = ExtraParams::new().with("-preset", "slow").with("-g", "50");
        config.apply_to(&mut params);

        assert_eq!(params.to_args(), vec!["-preset", "ultrafast", "-g", "50"]);
    }

    #[test]
    fn test_apply_to_without_tls_verify() {
        let config = RtmpsConfig::new("host/app", "key").with_tls_verify(false);
        let mut params = ExtraParams::new();
        config.apply_to(&mut params);

        assert_eq!(params.to_args(), vec!["-rtmp_conn", "S:0"]);
    }
}
