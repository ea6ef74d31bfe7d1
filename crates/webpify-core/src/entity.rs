//! The in-flight image: one source file's current bytes and format tag.

use std::path::{Path, PathBuf};

use crate::error::PipelineResult;
use crate::options::OptionPipeline;
use crate::transform::{TransformEngine, Transformed};
use crate::types::ImageFormat;

/// An image moving through the pipeline.
///
/// `buffer` is always valid content for `format`. Both only change together
/// through [`Image::apply`], which swaps in a complete [`Transformed`] result.
#[derive(Debug, Clone)]
pub struct Image {
    source_path: PathBuf,
    base_name: String,
    format: ImageFormat,
    extension: String,
    buffer: Vec<u8>,
}

impl Image {
    /// Wrap raw bytes read from `path` without applying any options.
    ///
    /// The base name is the file name minus its final extension; the initial
    /// format and extension come from that extension.
    pub fn new(path: &Path, buffer: Vec<u8>) -> Self {
        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            source_path: path.to_path_buf(),
            base_name,
            format: ImageFormat::from_path(path),
            extension,
            buffer,
        }
    }

    /// Build an image from `path`'s bytes and apply `options` in order.
    ///
    /// Stops at the first failing option. On failure only the error is
    /// returned; the partially transformed image is dropped with it.
    pub fn construct(
        path: &Path,
        buffer: Vec<u8>,
        options: &OptionPipeline,
        engine: &TransformEngine,
    ) -> PipelineResult<Self> {
        let mut image = Self::new(path, buffer);
        options.apply(&mut image, engine)?;
        Ok(image)
    }

    /// Swap in a transformation result as one step.
    ///
    /// The extension follows the format only when the format actually
    /// changed, so a resized `photo.JPG` is still written as `photo.JPG`.
    pub(crate) fn apply(&mut self, transformed: Transformed) {
        if transformed.format != self.format {
            self.extension = transformed.format.canonical_extension().to_string();
        }
        self.format = transformed.format;
        self.buffer = transformed.buffer;
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn format(&self) -> &ImageFormat {
        &self.format
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Output file name: `<base_name>.<extension>`, or just the base name
    /// when the source had no extension.
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.base_name.clone()
        } else {
            format!("{}.{}", self.base_name, self.extension)
        }
    }
}
