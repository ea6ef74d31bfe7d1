//! webpify core - embeddable batch image conversion library.
//!
//! Reads source images, optionally resizes them, re-encodes them as lossy
//! WebP and writes the results to an output directory.
//!
//! # Architecture
//!
//! Three stages run concurrently, connected by bounded channels:
//!
//! ```text
//! Source enumerator → Stage pump (options → transform engine) → Sink
//! ```
//!
//! Each image is owned by exactly one stage at a time. A failure in one image
//! is logged and counted; the rest of the batch carries on.
//!
//! # Usage
//!
//! ```rust,ignore
//! use webpify_core::{BatchConverter, Config, ConvertRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), webpify_core::ConfigError> {
//!     let config = Config::load()?;
//!     let request = ConvertRequest::from_config(&config, vec!["./test1.jpeg".into()]);
//!     let report = BatchConverter::new(config, request)?.run().await;
//!     println!("Wrote {} file(s)", report.written);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod entity;
pub mod error;
pub mod observe;
pub mod options;
pub mod pipeline;
pub mod transform;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use entity::Image;
pub use error::{ConfigError, PipelineError, PipelineResult};
pub use observe::{PipelineEvent, PipelineObserver, TracingObserver};
pub use options::{ImageOption, OptionPipeline};
pub use pipeline::{BatchConverter, ConvertRequest, FileDiscovery};
pub use transform::{TransformEngine, Transformed};
pub use types::{BatchReport, ImageFormat, TargetFormat};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
