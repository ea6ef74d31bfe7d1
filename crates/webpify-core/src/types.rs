//! Core data types shared across the conversion pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Codec tag for an in-flight image's current buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    /// Anything else, keyed by its lowercase extension ("" when absent).
    /// Carried through untouched; never decoded.
    Other(String),
}

impl ImageFormat {
    /// Parse a format tag from a file extension (case-insensitive, no dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "webp" => Self::WebP,
            other => Self::Other(other.to_string()),
        }
    }

    /// Parse a format tag from a path's final extension.
    pub fn from_path(path: &Path) -> Self {
        Self::from_extension(path.extension().and_then(|e| e.to_str()).unwrap_or(""))
    }

    /// Whether the transformation engine can decode and re-encode this format.
    pub fn is_raster(&self) -> bool {
        matches!(self, Self::Jpeg | Self::Png)
    }

    /// The matching codec in the `image` crate, if there is one we handle.
    pub fn codec(&self) -> Option<image::ImageFormat> {
        match self {
            Self::Jpeg => Some(image::ImageFormat::Jpeg),
            Self::Png => Some(image::ImageFormat::Png),
            Self::WebP => Some(image::ImageFormat::WebP),
            Self::Other(_) => None,
        }
    }

    /// Extension written for a buffer freshly encoded in this format.
    pub fn canonical_extension(&self) -> &str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Other(ext) => ext,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(ext) if ext.is_empty() => write!(f, "unknown"),
            other => write!(f, "{}", other.canonical_extension()),
        }
    }
}

/// Format requested by a `Reformat` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    /// Lossy WebP, the only target that currently transcodes.
    #[default]
    WebP,
    /// Reserved: accepted as configuration, passes the image through unchanged.
    Jpeg,
    /// Reserved: accepted as configuration, passes the image through unchanged.
    Png,
}

impl TargetFormat {
    /// Parse a target format name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "webp" => Some(Self::WebP),
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WebP => write!(f, "webp"),
            Self::Jpeg => write!(f, "jpeg"),
            Self::Png => write!(f, "png"),
        }
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchReport {
    /// Input paths handed to the enumerator
    pub inputs: usize,

    /// Inputs that were opened and handed to the stage pump
    pub opened: usize,

    /// Inputs that could not be opened
    pub open_failed: usize,

    /// Images that went through every option successfully
    pub converted: usize,

    /// Images that failed during read or transformation
    pub convert_failed: usize,

    /// Output files written
    pub written: usize,

    /// Images that converted but could not be saved
    pub save_failed: usize,

    /// Whether the run was cancelled before draining every input
    pub cancelled: bool,

    /// Output paths in the order they were written
    pub outputs: Vec<PathBuf>,

    /// Total wall-clock time in seconds
    pub total_seconds: f64,

    /// Written images per second
    pub images_per_second: f64,
}

impl BatchReport {
    /// Total number of per-item failures across all stages.
    pub fn failures(&self) -> usize {
        self.open_failed + self.convert_failed + self.save_failed
    }
}
