use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - ffmpeg path is set and the timeout is non-zero
/// - stream frame rate is non-zero
/// - merge image scale is set
/// - an `[rtmps]` section, if present, names a server
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.ffmpeg.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "ffmpeg.path cannot be empty".to_string(),
        ));
    }

    if config.ffmpeg.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "ffmpeg.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.stream.frame_rate == 0 {
        return Err(ConfigError::ValidationError(
            "stream.frame_rate cannot be 0".to_string(),
        ));
    }

    if config.merge.image_scale.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "merge.image_scale cannot be empty".to_string(),
        ));
    }

    if let Some(rtmps) = &config.rtmps {
        if rtmps.server.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "rtmps.server cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
