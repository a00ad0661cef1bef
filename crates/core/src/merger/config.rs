//! Configuration for image + audio merges.

use serde::{Deserialize, Serialize};

use crate::streamer::ExtraParams;

/// How a still image and an audio track are combined into video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// How long the image is shown, in seconds. Zero or less means no limit.
    #[serde(default = "default_image_duration")]
    pub image_duration_secs: f64,

    /// Scale filter size, `W:H`.
    #[serde(default = "default_image_scale")]
    pub image_scale: String,

    /// Loop the audio input.
    #[serde(default = "default_audio_loop")]
    pub audio_loop: bool,

    /// Container for file output. Empty lets ffmpeg guess from the extension.
    #[serde(default = "default_output_format")]
    pub output_format: String,

    #[serde(default)]
    pub extra_params: ExtraParams,
}

fn default_image_duration() -> f64 {
    10.0
}

fn default_image_scale() -> String {
    "1920:1080".to_string()
}

fn default_audio_loop() -> bool {
    true
}

fn default_output_format() -> String {
    "mp4".to_string()
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            image_duration_secs: default_image_duration(),
            image_scale: default_image_scale(),
            audio_loop: default_audio_loop(),
            output_format: default_output_format(),
            extra_params: ExtraParams::new(),
        }
    }
}

impl MergeConfig {
    /// Input options placed before the audio `-i`.
    pub(crate) fn audio_input_args(&self) -> Vec<String> {
        if self.audio_loop {
            vec!["-stream_loop".to_string(), "-1".to_string()]
        } else {
            Vec::new()
        }
    }

    /// `-t` with two decimals, when a positive duration is set.
    pub(crate) fn duration_args(&self) -> Vec<String> {
        if self.image_duration_secs > 0.0 {
            vec![
                "-t".to_string(),
                format!("{:.2}", self.image_duration_secs),
            ]
        } else {
            Vec::new()
        }
    }

    pub(crate) fn scale_filter(&self) -> String {
        format!("scale={}", self.image_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_merge_config() {
        let config = MergeConfig::default();
        assert_eq!(config.image_duration_secs, 10.0);
        assert_eq!(config.image_scale, "1920:1080");
        assert!(config.audio_loop);
        assert_eq!(config.output_format, "mp4");
        assert!(config.extra_params.is_empty());
    }

    #[test]
    fn test_duration_args() {
        let config = MergeConfig {
            image_duration_secs: 30.0,
            ..Default::default()
        };
        assert_eq!(config.duration_args(), vec!["-t", "30.00"]);

        let config = MergeConfig {
            image_duration_secs: 0.0,
            ..Default::default()
        };
        assert!(config.duration_args().is_empty());
    }

    #[test]
    fn test_audio_input_args() {
        assert_eq!(
            MergeConfig::default().audio_input_args(),
            vec!["-stream_loop", "-1"]
        );
        let config = MergeConfig {
            audio_loop: false,
            ..Default::default()
        };
        assert!(config.audio_input_args().is_empty());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: MergeConfig = toml::from_str(
            r#"
image_duration_secs = 60.0
audio_loop = false
"#,
        )
        .unwrap();
        assert_eq!(config.image_duration_secs, 60.0);
        assert!(!config.audio_loop);
        assert_eq!(config.image_scale, "1920:1080");
    }
}
