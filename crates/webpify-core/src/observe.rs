//! Observability hooks passed explicitly into each pipeline stage.

use std::path::Path;

use crate::error::PipelineError;

/// Something that happened to one input as it moved through the pipeline.
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    /// Input opened and handed to the stage pump
    Opened { path: &'a Path },
    /// Input could not be opened; it is skipped
    OpenFailed { error: &'a PipelineError },
    /// Every option applied successfully
    Converted { path: &'a Path, bytes: usize },
    /// Reading or transforming the input failed
    ConvertFailed { error: &'a PipelineError },
    /// Output file written
    Saved { source: &'a Path, dest: &'a Path },
    /// Output file could not be written
    SaveFailed { error: &'a PipelineError },
}

/// Receives pipeline events. Shared across stages, so it must be `Sync`.
pub trait PipelineObserver: Send + Sync {
    fn record(&self, event: PipelineEvent<'_>);
}

/// Default observer: forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn record(&self, event: PipelineEvent<'_>) {
        match event {
            PipelineEvent::Opened { path } => tracing::trace!("Opened {:?}", path),
            PipelineEvent::OpenFailed { error } => {
                tracing::warn!(
                    path = ?error.path(),
                    stage = error.stage(),
                    "Skipping input: {}",
                    error
                );
            }
            PipelineEvent::Converted { path, bytes } => {
                tracing::debug!("Converted {:?} ({} bytes)", path, bytes);
            }
            PipelineEvent::ConvertFailed { error } | PipelineEvent::SaveFailed { error } => {
                tracing::error!(
                    path = ?error.path(),
                    stage = error.stage(),
                    "Failed: {}",
                    error
                );
            }
            PipelineEvent::Saved { source, dest } => {
                tracing::info!("Wrote {} (from {:?})", dest.display(), source);
            }
        }
    }
}
