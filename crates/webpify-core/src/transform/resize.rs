//! Lanczos resampling with zero-as-unspecified target dimensions.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Resolve the requested size against the source size.
///
/// A zero on one axis means "unspecified": that axis is derived from the
/// other so the aspect ratio is kept. Derived sizes never drop below 1.
/// Both zero keeps the source size. The derived axis is not bounded, so
/// callers check the result against their dimension limit before resampling.
pub fn target_dimensions(source: (u32, u32), requested: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    match requested {
        (0, 0) => source,
        (w, 0) => {
            let h = (w as f64 * src_h as f64 / src_w.max(1) as f64).round() as u32;
            (w, h.max(1))
        }
        (0, h) => {
            let w = (h as f64 * src_w as f64 / src_h.max(1) as f64).round() as u32;
            (w.max(1), h)
        }
        exact => exact,
    }
}

/// Resample `image` to the requested size with a Lanczos3 filter.
pub fn resample(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (w, h) = target_dimensions(image.dimensions(), (width, height));
    image.resize_exact(w, h, FilterType::Lanczos3)
}
