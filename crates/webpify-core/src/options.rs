//! Option pipeline: declared per-image transformations and their applier.
//!
//! Options are plain data, so a pipeline can be inspected and validated
//! before any file is opened. [`OptionPipeline::apply`] interprets them
//! against an [`Image`] through the [`TransformEngine`].

use crate::config::{ConversionConfig, LimitsConfig};
use crate::entity::Image;
use crate::error::{ConfigError, PipelineResult};
use crate::transform::TransformEngine;
use crate::types::TargetFormat;

/// One configuration step applied to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOption {
    /// Resize to `width`×`height`; zero on an axis derives it from the other,
    /// zero on both is a no-op.
    Resize { width: u32, height: u32 },

    /// Re-encode to `target`. Only [`TargetFormat::WebP`] transcodes;
    /// JPEG and PNG targets are reserved and pass the image through.
    Reformat { target: TargetFormat },
}

impl ImageOption {
    /// Whether this step can never change an image.
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Resize { width, height } => *width == 0 && *height == 0,
            Self::Reformat { target } => *target != TargetFormat::WebP,
        }
    }

    /// Apply this step to `image`. On error the image is left untouched.
    pub fn apply(&self, image: &mut Image, engine: &TransformEngine) -> PipelineResult<()> {
        let outcome = match *self {
            Self::Resize { width, height } => engine.resize(image, width, height)?,
            Self::Reformat {
                target: TargetFormat::WebP,
            } => engine.reformat_webp(image)?,
            Self::Reformat { target } => {
                tracing::debug!(
                    "Reformat to {} is not implemented; {:?} passes through",
                    target,
                    image.source_path()
                );
                None
            }
        };

        if let Some(transformed) = outcome {
            image.apply(transformed);
        }
        Ok(())
    }
}

/// An ordered list of options applied to every image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionPipeline {
    steps: Vec<ImageOption>,
}

impl OptionPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline from explicit steps, kept in the given order.
    pub fn from_steps(steps: Vec<ImageOption>) -> Self {
        Self { steps }
    }

    /// Standard pipeline for a conversion config: resize, then reformat.
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new()
            .resize(config.width, config.height)
            .reformat(config.target_format)
    }

    /// Append a resize step.
    pub fn resize(mut self, width: u32, height: u32) -> Self {
        self.steps.push(ImageOption::Resize { width, height });
        self
    }

    /// Append a reformat step.
    pub fn reformat(mut self, target: TargetFormat) -> Self {
        self.steps.push(ImageOption::Reformat { target });
        self
    }

    pub fn steps(&self) -> &[ImageOption] {
        &self.steps
    }

    /// Whether no step can change an image, so outputs are byte copies.
    pub fn is_noop(&self) -> bool {
        self.steps.iter().all(ImageOption::is_noop)
    }

    /// Check requested sizes against limits before any I/O happens.
    pub fn validate(&self, limits: &LimitsConfig) -> Result<(), ConfigError> {
        for step in &self.steps {
            if let ImageOption::Resize { width, height } = step {
                if *width > limits.max_image_dimension || *height > limits.max_image_dimension {
                    return Err(ConfigError::ValidationError(format!(
                        "resize to {}x{} exceeds limits.max_image_dimension ({})",
                        width, height, limits.max_image_dimension
                    )));
                }
            }
        }
        Ok(())
    }

    /// Apply every step in order, stopping at the first failure.
    pub fn apply(&self, image: &mut Image, engine: &TransformEngine) -> PipelineResult<()> {
        for step in &self.steps {
            step.apply(image, engine)?;
        }
        Ok(())
    }
}
