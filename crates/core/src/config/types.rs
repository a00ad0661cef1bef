use serde::{Deserialize, Serialize};

use crate::merger::MergeConfig;
use crate::rtmps::RtmpsConfig;
use crate::streamer::{StreamOptions, StreamerConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ffmpeg: StreamerConfig,
    #[serde(default)]
    pub stream: StreamOptions,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub rtmps: Option<RtmpsConfig>,
}

/// Sanitized config for display (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub ffmpeg: StreamerConfig,
    pub stream: StreamOptions,
    pub merge: MergeConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtmps: Option<SanitizedRtmpsConfig>,
}

/// Sanitized RTMPS config (stream key and password hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedRtmpsConfig {
    pub server: String,
    pub stream_key_configured: bool,
    pub username: String,
    pub password_configured: bool,
    pub tls_verify: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            ffmpeg: config.ffmpeg.clone(),
            stream: config.stream.clone(),
            merge: config.merge.clone(),
            rtmps: config.rtmps.as_ref().map(|r| SanitizedRtmpsConfig {
                server: r.server.clone(),
                stream_key_configured: !r.stream_key.is_empty(),
                username: r.username.clone(),
                password_configured: !r.password.is_empty(),
                tls_verify: r.tls_verify,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.ffmpeg.path, PathBuf::from("ffmpeg"));
        assert_eq!(config.ffmpeg.timeout_secs, 30);
        assert_eq!(config.stream.retry_count, 3);
        assert_eq!(config.merge.image_scale, "1920:1080");
        assert!(config.rtmps.is_none());
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[ffmpeg]
path = "/usr/local/bin/ffmpeg"
timeout_secs = 120
log_level = "warning"

[stream]
bitrate = "3000k"
frame_rate = 30
retry_count = 5
retry_delay_ms = 3000
extra_params = [["-preset", "veryfast"]]

[merge]
image_duration_secs = 60.0
image_scale = "1280:720"

[rtmps]
server = "rtmps://live.example.com/live"
stream_key = "secret-key"
tls_verify = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.ffmpeg.timeout_secs, 120);
        assert_eq!(config.ffmpeg.log_level.as_deref(), Some("warning"));
        assert_eq!(config.stream.bitrate, "3000k");
        assert_eq!(config.stream.frame_rate, 30);
        assert_eq!(config.stream.video_codec, "libx264"); // default
        assert_eq!(config.stream.extra_params.get("-preset"), Some("veryfast"));
        assert_eq!(config.merge.image_scale, "1280:720");
        assert!(config.merge.audio_loop); // default

        let rtmps = config.rtmps.as_ref().unwrap();
        assert_eq!(rtmps.server, "rtmps://live.example.com/live");
        assert!(!rtmps.tls_verify);
    }

    #[test]
    fn test_deserialize_rtmps_requires_server() {
        let toml = r#"
[rtmps]
stream_key = "abc"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config_hides_secrets() {
        let config = Config {
            rtmps: Some(
                RtmpsConfig::new("live.example.com/app", "secret-key")
                    .with_credentials("user", "hunter2"),
            ),
            ..Default::default()
        };

        let sanitized = SanitizedConfig::from(&config);
        let rtmps = sanitized.rtmps.as_ref().unwrap();
        assert!(rtmps.stream_key_configured);
        assert!(rtmps.password_configured);
        assert_eq!(rtmps.username, "user");

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-key"));
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn test_sanitized_config_without_rtmps() {
        let sanitized = SanitizedConfig::from(&Config::default());
        assert!(sanitized.rtmps.is_none());
        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("rtmps"));
    }
}
