//! Pipeline orchestration: wires enumerator, stage pump and sink together.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::ConfigError;
use crate::observe::{PipelineObserver, TracingObserver};
use crate::options::OptionPipeline;
use crate::types::BatchReport;

use super::channel::{output_channel, source_channel};
use super::pump::StagePump;
use super::sink::Sink;
use super::source::{SourceEnumerator, SourceSummary};

/// Everything that varies per batch: what to read, where to write, and what
/// to do to each image.
#[derive(Debug, Clone, Default)]
pub struct ConvertRequest {
    /// Input files, converted in this order
    pub inputs: Vec<PathBuf>,
    /// Output directory (`None` writes to the working directory)
    pub output_dir: Option<PathBuf>,
    /// Options applied to every image
    pub options: OptionPipeline,
}

impl ConvertRequest {
    /// Build a request from the config's conversion and output settings.
    pub fn from_config(config: &Config, inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            output_dir: Some(config.output_dir()),
            options: OptionPipeline::from_config(&config.conversion),
        }
    }
}

/// Runs one batch through the staged pipeline.
pub struct BatchConverter {
    config: Config,
    request: ConvertRequest,
    observer: Arc<dyn PipelineObserver>,
}

impl BatchConverter {
    /// Create a converter. Config and options are validated before any file
    /// is touched.
    pub fn new(config: Config, request: ConvertRequest) -> Result<Self, ConfigError> {
        config.validate()?;
        request.options.validate(&config.limits)?;
        Ok(Self {
            config,
            request,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replace the default tracing observer.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Number of inputs this batch will enumerate.
    pub fn input_count(&self) -> usize {
        self.request.inputs.len()
    }

    /// Convert every input. Per-image failures are counted, never returned.
    pub async fn run(self) -> BatchReport {
        self.run_with_cancel(CancellationToken::new()).await
    }

    /// Convert every input until done or until `cancel` fires.
    ///
    /// The enumerator and stage pump run as background tasks; the sink runs
    /// here, on the calling task, as results arrive.
    pub async fn run_with_cancel(self, cancel: CancellationToken) -> BatchReport {
        let start = Instant::now();
        let Self {
            config,
            request,
            observer,
        } = self;
        let mut report = BatchReport {
            inputs: request.inputs.len(),
            ..Default::default()
        };

        let (job_tx, job_rx) = source_channel(&config.pipeline);
        let (out_tx, mut out_rx) = output_channel(&config.pipeline);

        let source = SourceEnumerator::new(request.inputs, Arc::clone(&observer))
            .spawn(job_tx, cancel.clone());
        let pump = StagePump::new(&config, request.options, Arc::clone(&observer)).spawn(
            job_rx,
            out_tx,
            cancel.clone(),
        );
        let sink = Sink::new(request.output_dir, &config.limits, observer);

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                next = out_rx.recv() => next,
            };
            let Some(result) = next else { break };

            match result {
                Ok(image) => {
                    report.converted += 1;
                    match sink.save(&image).await {
                        Ok(dest) => {
                            report.written += 1;
                            report.outputs.push(dest);
                        }
                        Err(_) => report.save_failed += 1,
                    }
                }
                Err(_) => report.convert_failed += 1,
            }
        }
        drop(out_rx);

        let summary = source.await.unwrap_or_else(|e| {
            tracing::error!("Source enumerator task failed: {}", e);
            SourceSummary::default()
        });
        if let Err(e) = pump.await {
            tracing::error!("Stage pump task failed: {}", e);
        }

        report.opened = summary.opened;
        report.open_failed = summary.failed;
        report.cancelled = cancel.is_cancelled();
        report.total_seconds = start.elapsed().as_secs_f64();
        if report.total_seconds > 0.0 {
            report.images_per_second = report.written as f64 / report.total_seconds;
        }

        tracing::debug!(
            "Batch finished: {} written, {} failed in {:.2}s",
            report.written,
            report.failures(),
            report.total_seconds
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::testing::RecordingObserver;

    #[test]
    fn test_request_from_config() {
        let mut config = Config::default();
        config.conversion.width = 320;
        let request = ConvertRequest::from_config(&config, vec![PathBuf::from("a.png")]);
        assert_eq!(request.inputs.len(), 1);
        assert_eq!(request.output_dir, Some(PathBuf::from("results")));
        assert_eq!(request.options, OptionPipeline::from_config(&config.conversion));
    }

    #[test]
    fn test_new_rejects_oversized_resize() {
        let config = Config::default();
        let request = ConvertRequest {
            options: OptionPipeline::new().resize(config.limits.max_image_dimension + 1, 0),
            ..Default::default()
        };
        assert!(BatchConverter::new(config, request).is_err());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let report = BatchConverter::new(Config::default(), ConvertRequest::default())
            .unwrap()
            .run()
            .await;
        assert_eq!(report.inputs, 0);
        assert_eq!(report.written, 0);
        assert!(!report.cancelled);
    }

    #[tokio::test]
    async fn test_cancelled_batch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.png");
        std::fs::write(&input, b"x").unwrap();

        let observer = Arc::new(RecordingObserver::default());
        let request = ConvertRequest {
            inputs: vec![input],
            output_dir: Some(dir.path().join("out")),
            options: OptionPipeline::new(),
        };
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = BatchConverter::new(Config::default(), request)
            .unwrap()
            .with_observer(observer.clone())
            .run_with_cancel(cancel)
            .await;

        assert!(report.cancelled);
        assert_eq!(report.written, 0);
        assert_eq!(observer.count("saved"), 0);
    }
}
