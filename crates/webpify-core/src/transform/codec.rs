//! Codec dispatch: decode by declared format, encode back to a format.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};
use std::io::Cursor;
use std::path::Path;

use crate::error::PipelineError;
use crate::types::ImageFormat;

/// Decode `bytes` strictly as `format`, rejecting oversized images.
///
/// The declared format wins over content sniffing: a PNG stored as `.jpg`
/// fails here rather than being silently re-encoded as something else.
pub fn decode(
    bytes: &[u8],
    format: &ImageFormat,
    path: &Path,
    max_dim: u32,
) -> Result<DynamicImage, PipelineError> {
    let codec = format
        .codec()
        .ok_or_else(|| PipelineError::UnsupportedFormat {
            path: path.to_path_buf(),
            format: format.to_string(),
        })?;

    let image =
        image::load_from_memory_with_format(bytes, codec).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let (width, height) = image.dimensions();
    if width > max_dim || height > max_dim {
        return Err(PipelineError::ImageTooLarge {
            path: path.to_path_buf(),
            width,
            height,
            max_dim,
        });
    }
    Ok(image)
}

/// Re-encode pixels with the codec for `format`.
///
/// Only JPEG and PNG are re-encoded in place; WebP output goes through
/// [`encode_webp`] because it needs the lossy encoder.
pub fn encode(
    image: &DynamicImage,
    format: &ImageFormat,
    jpeg_quality: u8,
    path: &Path,
) -> Result<Vec<u8>, PipelineError> {
    let mut buffer = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel and no 16-bit support
            let rgb;
            let source = match image {
                DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
                other => {
                    rgb = DynamicImage::ImageRgb8(other.to_rgb8());
                    &rgb
                }
            };
            let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality);
            source
                .write_with_encoder(encoder)
                .map_err(|e| PipelineError::Encode {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
        }
        ImageFormat::Png => {
            image
                .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
                .map_err(|e| PipelineError::Encode {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
        }
        other => {
            return Err(PipelineError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: other.to_string(),
            })
        }
    }
    Ok(buffer)
}

/// Encode pixels as lossy WebP at `quality` with libwebp's default preset.
pub fn encode_webp(
    image: &DynamicImage,
    quality: f32,
    path: &Path,
) -> Result<Vec<u8>, PipelineError> {
    // libwebp only takes 8-bit RGB or RGBA
    let rgba;
    let source = match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
        other => {
            rgba = DynamicImage::ImageRgba8(other.to_rgba8());
            &rgba
        }
    };

    let encoder =
        webp::Encoder::from_image(source).map_err(|e| PipelineError::EncoderConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let memory = encoder
        .encode_simple(false, quality)
        .map_err(|e| PipelineError::Encode {
            path: path.to_path_buf(),
            message: format!("{:?}", e),
        })?;

    Ok(memory.to_vec())
}
