//! Source enumerator: opens input paths in order and hands them downstream.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs::File;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::PipelineError;
use crate::observe::{PipelineEvent, PipelineObserver};

/// An opened input file. Moved, never shared, between stages.
#[derive(Debug)]
pub struct ImageJob {
    pub path: PathBuf,
    pub file: File,
}

/// Counts reported by the enumerator once it finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceSummary {
    /// Inputs opened and sent to the stage pump
    pub opened: usize,
    /// Inputs that failed to open and were skipped
    pub failed: usize,
}

/// Turns an ordered list of paths into a finite sequence of opened files.
pub struct SourceEnumerator {
    paths: Vec<PathBuf>,
    observer: Arc<dyn PipelineObserver>,
}

impl SourceEnumerator {
    pub fn new(paths: Vec<PathBuf>, observer: Arc<dyn PipelineObserver>) -> Self {
        Self { paths, observer }
    }

    /// Run the enumerator as a background task.
    pub fn spawn(
        self,
        tx: mpsc::Sender<ImageJob>,
        cancel: CancellationToken,
    ) -> JoinHandle<SourceSummary> {
        tokio::spawn(self.run(tx, cancel))
    }

    /// Open each path in order and send it on `tx`.
    ///
    /// Paths that fail to open are reported and skipped. The channel closes
    /// when this returns: after the last path, on cancellation, or once the
    /// receiver is gone.
    pub async fn run(self, tx: mpsc::Sender<ImageJob>, cancel: CancellationToken) -> SourceSummary {
        let mut summary = SourceSummary::default();

        for path in self.paths {
            if cancel.is_cancelled() {
                break;
            }

            let file = match File::open(&path).await {
                Ok(file) => file,
                Err(e) => {
                    let error = PipelineError::Open {
                        path,
                        message: e.to_string(),
                    };
                    self.observer
                        .record(PipelineEvent::OpenFailed { error: &error });
                    summary.failed += 1;
                    continue;
                }
            };
            self.observer.record(PipelineEvent::Opened { path: &path });

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                sent = tx.send(ImageJob { path, file }) => {
                    if sent.is_err() {
                        tracing::debug!("Stage pump gone, stopping enumeration");
                        break;
                    }
                }
            }
            summary.opened += 1;
        }

        summary
    }
}
