//! Stage pump: turns opened files into converted images.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, LimitsConfig};
use crate::entity::Image;
use crate::error::{PipelineError, PipelineResult};
use crate::observe::{PipelineEvent, PipelineObserver};
use crate::options::OptionPipeline;
use crate::transform::TransformEngine;

use super::source::ImageJob;

/// Background stage that reads each job, applies the option pipeline and
/// forwards the image, or a tagged error, to the sink.
///
/// With one worker (the default) images are transformed one at a time and
/// leave in input order. With more workers, transformations overlap and
/// `preserve_order` decides whether output follows input order or
/// completion order.
pub struct StagePump {
    options: Arc<OptionPipeline>,
    engine: Arc<TransformEngine>,
    limits: LimitsConfig,
    workers: usize,
    preserve_order: bool,
    observer: Arc<dyn PipelineObserver>,
}

impl StagePump {
    pub fn new(
        config: &Config,
        options: OptionPipeline,
        observer: Arc<dyn PipelineObserver>,
    ) -> Self {
        Self {
            options: Arc::new(options),
            engine: Arc::new(TransformEngine::new(
                config.encoding.clone(),
                config.limits.clone(),
            )),
            limits: config.limits.clone(),
            workers: config.pipeline.workers.max(1),
            preserve_order: config.pipeline.preserve_order,
            observer,
        }
    }

    /// Run the pump as a background task.
    pub fn spawn(
        self,
        rx: mpsc::Receiver<ImageJob>,
        tx: mpsc::Sender<PipelineResult<Image>>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(self.run(rx, tx, cancel))
    }

    /// Drain `rx` until it closes, sending one result per job on `tx`.
    pub async fn run(
        self,
        rx: mpsc::Receiver<ImageJob>,
        tx: mpsc::Sender<PipelineResult<Image>>,
        cancel: CancellationToken,
    ) {
        let workers = self.workers;
        let ordered = self.preserve_order || workers == 1;
        let observer = Arc::clone(&self.observer);
        let pump = Arc::new(self);

        let jobs = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|job| (job, rx))
        });
        let converted = jobs.map(move |job| {
            let pump = Arc::clone(&pump);
            async move { pump.convert(job).await }
        });
        let mut results: BoxStream<'static, PipelineResult<Image>> = if ordered {
            converted.buffered(workers).boxed()
        } else {
            converted.buffer_unordered(workers).boxed()
        };

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                next = results.next() => next,
            };
            let Some(result) = next else { break };

            match &result {
                Ok(image) => observer.record(PipelineEvent::Converted {
                    path: image.source_path(),
                    bytes: image.buffer().len(),
                }),
                Err(error) => observer.record(PipelineEvent::ConvertFailed { error }),
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                sent = tx.send(result) => {
                    if sent.is_err() {
                        tracing::debug!("Sink gone, stopping stage pump");
                        break;
                    }
                }
            }
        }
    }

    /// Read one job to memory and build its image off the async runtime.
    async fn convert(&self, job: ImageJob) -> PipelineResult<Image> {
        let start = Instant::now();
        let ImageJob { path, mut file } = job;

        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if let Ok(metadata) = file.metadata().await {
            if metadata.len() > max_bytes {
                return Err(PipelineError::FileTooLarge {
                    path,
                    size_mb: metadata.len() / (1024 * 1024),
                    max_mb: self.limits.max_file_size_mb,
                });
            }
        }

        let mut buffer = Vec::new();
        if let Err(e) = file.read_to_end(&mut buffer).await {
            return Err(PipelineError::Read {
                path,
                message: e.to_string(),
            });
        }
        drop(file);
        tracing::trace!("  Read {:?}: {} bytes in {:?}", path, buffer.len(), start.elapsed());

        let options = Arc::clone(&self.options);
        let engine = Arc::clone(&self.engine);
        let path_owned = path.clone();
        let timeout_ms = self.limits.transform_timeout_ms;

        let result = timeout(
            Duration::from_millis(timeout_ms),
            tokio::task::spawn_blocking(move || {
                Image::construct(&path_owned, buffer, &options, &engine)
            }),
        )
        .await;
        tracing::trace!("  Transform {:?}: {:?}", path, start.elapsed());

        match result {
            Ok(Ok(constructed)) => constructed,
            Ok(Err(e)) => Err(join_failure(path, e)),
            Err(_) => Err(PipelineError::Timeout {
                path,
                stage: "transform".to_string(),
                timeout_ms,
            }),
        }
    }
}

/// A transformation that never returned: it panicked or its task was cancelled.
fn join_failure(path: PathBuf, err: JoinError) -> PipelineError {
    let message = if err.is_panic() {
        "transformation panicked".to_string()
    } else {
        format!("task join error: {}", err)
    };
    PipelineError::Task { path, message }
}
