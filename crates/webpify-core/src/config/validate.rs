//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.buffer_size == 0 {
            return Err(ConfigError::ValidationError(
                "pipeline.buffer_size must be > 0".into(),
            ));
        }
        if self.pipeline.source_buffer_size == 0 {
            return Err(ConfigError::ValidationError(
                "pipeline.source_buffer_size must be > 0".into(),
            ));
        }
        if self.pipeline.workers == 0 {
            return Err(ConfigError::ValidationError(
                "pipeline.workers must be > 0".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.limits.transform_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.transform_timeout_ms must be > 0".into(),
            ));
        }
        if self.limits.save_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.save_timeout_ms must be > 0".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.encoding.webp_quality) {
            return Err(ConfigError::ValidationError(
                "encoding.webp_quality must be between 0.0 and 100.0".into(),
            ));
        }
        if self.encoding.jpeg_quality == 0 || self.encoding.jpeg_quality > 100 {
            return Err(ConfigError::ValidationError(
                "encoding.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self
            .logging
            .level
            .parse::<tracing::level_filters::LevelFilter>()
            .is_err()
        {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of off, error, warn, info, debug, trace (got {:?})",
                self.logging.level
            )));
        }
        if !["pretty", "json"].contains(&self.logging.format.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\" (got {:?})",
                self.logging.format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = Config::default();
        config.pipeline.workers = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("workers"));
    }

    #[test]
    fn test_validate_rejects_zero_source_buffer() {
        let mut config = Config::default();
        config.pipeline.source_buffer_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("source_buffer_size"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.limits.save_timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("save_timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_invalid_quality() {
        let mut config = Config::default();
        config.encoding.webp_quality = 101.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("webp_quality"));

        config.encoding.webp_quality = 75.0;
        config.encoding.jpeg_quality = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jpeg_quality"));
    }

    #[test]
    fn test_validate_logging_section() {
        let mut config = Config::default();
        config.logging.level = "warn".to_string();
        assert!(config.validate().is_ok());

        config.logging.level = "loud".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.level"));

        config.logging.level = "trace".to_string();
        config.logging.format = "xml".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.format"));
    }
}
