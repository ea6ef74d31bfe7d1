//! Error types for the webpify conversion pipeline.
//!
//! Errors are organized by stage so every per-image failure can be logged with
//! the source path, the stage that failed, and the underlying cause.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-image pipeline errors, organized by stage.
///
/// None of these are fatal to a batch: the converter logs them, counts them
/// in the [`BatchReport`](crate::types::BatchReport) and moves on.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input file could not be opened
    #[error("Open error for {path}: {message}")]
    Open { path: PathBuf, message: String },

    /// Opened input could not be read to the end
    #[error("Read error for {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Bytes are malformed for the declared format
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Decoded image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Encoder could not be set up for the pixel data
    #[error("Encoder configuration error for {path}: {message}")]
    EncoderConfig { path: PathBuf, message: String },

    /// Encoding the transformed pixels failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Writing the output file failed
    #[error("Save error for {path}: {message}")]
    Save { path: PathBuf, message: String },

    /// Transformation task panicked or was cancelled
    #[error("Transform task failed for {path}: {message}")]
    Task { path: PathBuf, message: String },

    /// Operation timed out
    #[error("Timeout in {stage} stage for {path} after {timeout_ms}ms")]
    Timeout {
        path: PathBuf,
        stage: String,
        timeout_ms: u64,
    },

    /// Format cannot be handled by the requested operation
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },
}

impl PipelineError {
    /// The source path the failure belongs to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. }
            | Self::Read { path, .. }
            | Self::FileTooLarge { path, .. }
            | Self::Decode { path, .. }
            | Self::ImageTooLarge { path, .. }
            | Self::EncoderConfig { path, .. }
            | Self::Encode { path, .. }
            | Self::Save { path, .. }
            | Self::Task { path, .. }
            | Self::Timeout { path, .. }
            | Self::UnsupportedFormat { path, .. } => path,
        }
    }

    /// Name of the stage that produced the failure, for log records.
    pub fn stage(&self) -> &str {
        match self {
            Self::Open { .. } => "open",
            Self::Read { .. } | Self::FileTooLarge { .. } => "read",
            Self::Decode { .. } | Self::ImageTooLarge { .. } | Self::UnsupportedFormat { .. } => {
                "decode"
            }
            Self::EncoderConfig { .. } | Self::Encode { .. } => "encode",
            Self::Save { .. } => "save",
            Self::Task { .. } => "transform",
            Self::Timeout { stage, .. } => stage,
        }
    }
}

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        let open = PipelineError::Open {
            path: PathBuf::from("missing.jpeg"),
            message: "No such file or directory".to_string(),
        };
        assert_eq!(open.stage(), "open");
        assert_eq!(open.path(), Path::new("missing.jpeg"));

        let timeout = PipelineError::Timeout {
            path: PathBuf::from("a.png"),
            stage: "save".to_string(),
            timeout_ms: 100,
        };
        assert_eq!(timeout.stage(), "save");
    }

    #[test]
    fn test_error_message_includes_path() {
        let err = PipelineError::Decode {
            path: PathBuf::from("/photos/broken.jpg"),
            message: "invalid marker".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/photos/broken.jpg"));
        assert!(msg.contains("invalid marker"));
    }
}
