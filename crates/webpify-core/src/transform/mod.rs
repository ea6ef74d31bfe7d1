//! Transformation engine: stateless decode → resize/reformat → encode.
//!
//! Every operation reads an [`Image`] and returns an outcome without touching
//! it. The caller applies a successful [`Transformed`] as a single step, so a
//! failed operation can never leave an image half-mutated.

pub mod codec;
pub mod resize;

use image::GenericImageView;

use crate::config::{EncodingConfig, LimitsConfig};
use crate::entity::Image;
use crate::error::{PipelineError, PipelineResult};
use crate::types::ImageFormat;

/// Replacement state produced by a successful transformation.
#[derive(Debug)]
pub struct Transformed {
    /// Newly encoded bytes
    pub buffer: Vec<u8>,
    /// Format the bytes are encoded in
    pub format: ImageFormat,
}

/// Stateless transformation engine holding encoder settings and limits.
#[derive(Debug, Clone, Default)]
pub struct TransformEngine {
    encoding: EncodingConfig,
    limits: LimitsConfig,
}

impl TransformEngine {
    /// Create a new engine with the given encoder settings and limits.
    pub fn new(encoding: EncodingConfig, limits: LimitsConfig) -> Self {
        Self { encoding, limits }
    }

    /// Resize to `width`×`height`, keeping the image's current codec.
    ///
    /// Returns `Ok(None)` when there is nothing to do: both dimensions are
    /// zero, or the current format is not JPEG/PNG.
    pub fn resize(
        &self,
        image: &Image,
        width: u32,
        height: u32,
    ) -> PipelineResult<Option<Transformed>> {
        if width == 0 && height == 0 {
            return Ok(None);
        }
        if !image.format().is_raster() {
            tracing::debug!(
                "Resize skipped for {:?}: {} is not resizable",
                image.source_path(),
                image.format()
            );
            return Ok(None);
        }

        let path = image.source_path();
        let decoded = codec::decode(
            image.buffer(),
            image.format(),
            path,
            self.limits.max_image_dimension,
        )?;
        let (target_w, target_h) = resize::target_dimensions(decoded.dimensions(), (width, height));
        let max_dim = self.limits.max_image_dimension;
        if target_w > max_dim || target_h > max_dim {
            return Err(PipelineError::ImageTooLarge {
                path: path.to_path_buf(),
                width: target_w,
                height: target_h,
                max_dim,
            });
        }
        let resized = resize::resample(&decoded, target_w, target_h);
        let buffer = codec::encode(&resized, image.format(), self.encoding.jpeg_quality, path)?;

        Ok(Some(Transformed {
            buffer,
            format: image.format().clone(),
        }))
    }

    /// Transcode a JPEG or PNG image to lossy WebP.
    ///
    /// Any other current format (including WebP itself) returns `Ok(None)`:
    /// the bytes were not transcoded, so the format tag must not change.
    pub fn reformat_webp(&self, image: &Image) -> PipelineResult<Option<Transformed>> {
        if !image.format().is_raster() {
            tracing::debug!(
                "WebP conversion skipped for {:?}: source format is {}",
                image.source_path(),
                image.format()
            );
            return Ok(None);
        }

        let path = image.source_path();
        let decoded = codec::decode(
            image.buffer(),
            image.format(),
            path,
            self.limits.max_image_dimension,
        )?;
        let buffer = codec::encode_webp(&decoded, self.encoding.webp_quality, path)?;

        Ok(Some(Transformed {
            buffer,
            format: ImageFormat::WebP,
        }))
    }
}
