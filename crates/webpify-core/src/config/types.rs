//! Sub-configuration structs with defaults.

use crate::types::TargetFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What each image should be turned into.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Target codec for the reformat step
    pub target_format: TargetFormat,

    /// Target width in pixels (0 = derive from height)
    pub width: u32,

    /// Target height in pixels (0 = derive from width)
    pub height: u32,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            target_format: TargetFormat::WebP,
            width: 0,
            height: 0,
        }
    }
}

/// Where converted images are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, created on demand (supports `~`)
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("results"),
        }
    }
}

/// Pipeline settings for backpressure and fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Max converted images buffered ahead of the sink
    pub buffer_size: usize,

    /// Max opened files buffered ahead of the stage pump
    pub source_buffer_size: usize,

    /// Concurrent transformations inside the stage pump
    pub workers: usize,

    /// Emit results in input order when `workers > 1`
    pub preserve_order: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            buffer_size: 10,
            source_buffer_size: 10,
            workers: 1,
            preserve_order: true,
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height), decoded or requested
    pub max_image_dimension: u32,

    /// Per-image transformation timeout in milliseconds
    pub transform_timeout_ms: u64,

    /// Per-image save timeout in milliseconds
    pub save_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
            transform_timeout_ms: 30000,
            save_timeout_ms: 30000,
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Lossy WebP quality (0.0 - 100.0)
    pub webp_quality: f32,

    /// JPEG quality used when a resized JPEG is re-encoded (1 - 100)
    pub jpeg_quality: u8,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            webp_quality: 75.0,
            jpeg_quality: 75,
        }
    }
}

/// Input discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Extensions picked up when a directory is given as input
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
            ],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: off, error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
