//! Staged conversion pipeline.
//!
//! - **discovery**: Expand directory inputs into image paths
//! - **source**: Open inputs in order, skipping unreadable ones
//! - **pump**: Read and transform each image off the async runtime
//! - **sink**: Write finished images to the output directory
//! - **processor**: Wire the stages together and report on the batch
//! - **channel**: Bounded channels for backpressure

pub mod channel;
pub mod discovery;
pub mod processor;
pub mod pump;
pub mod sink;
pub mod source;

// Re-exports for convenient access
pub use discovery::FileDiscovery;
pub use processor::{BatchConverter, ConvertRequest};
pub use pump::StagePump;
pub use sink::Sink;
pub use source::{ImageJob, SourceEnumerator, SourceSummary};
