//! Bounded channels for backpressure in the conversion pipeline.
//!
//! Both hops are bounded: when the sink falls behind, the stage pump blocks on
//! send, which in turn stops the enumerator from opening more files.

use tokio::sync::mpsc;

use crate::config::PipelineConfig;
use crate::entity::Image;
use crate::error::PipelineResult;

use super::source::ImageJob;

/// Channel between the source enumerator and the stage pump.
pub fn source_channel(
    config: &PipelineConfig,
) -> (mpsc::Sender<ImageJob>, mpsc::Receiver<ImageJob>) {
    mpsc::channel(config.source_buffer_size)
}

/// Channel between the stage pump and the sink.
pub fn output_channel(
    config: &PipelineConfig,
) -> (
    mpsc::Sender<PipelineResult<Image>>,
    mpsc::Receiver<PipelineResult<Image>>,
) {
    mpsc::channel(config.buffer_size)
}
