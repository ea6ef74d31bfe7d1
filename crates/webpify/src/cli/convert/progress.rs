//! Progress reporting: an indicatif bar driven by pipeline events, plus the
//! end-of-run summary table.

use indicatif::{ProgressBar, ProgressStyle};
use webpify_core::{BatchReport, PipelineEvent, PipelineObserver, TracingObserver};

/// Forwards every event to [`TracingObserver`] and advances a progress bar
/// once per input that reaches a terminal state.
pub struct ProgressObserver {
    bar: ProgressBar,
    inner: TracingObserver,
}

impl ProgressObserver {
    pub fn new(bar: ProgressBar) -> Self {
        Self {
            bar,
            inner: TracingObserver,
        }
    }
}

impl PipelineObserver for ProgressObserver {
    fn record(&self, event: PipelineEvent<'_>) {
        let finished = is_terminal(&event);
        if let PipelineEvent::Saved { dest, .. } = &event {
            if let Some(name) = dest.file_name() {
                self.bar.set_message(name.to_string_lossy().into_owned());
            }
        }

        // Keep log lines from tearing the bar
        self.bar.suspend(|| self.inner.record(event));

        if finished {
            self.bar.inc(1);
        }
    }
}

/// An input is finished once it is saved or has failed at any stage.
fn is_terminal(event: &PipelineEvent<'_>) -> bool {
    matches!(
        event,
        PipelineEvent::Saved { .. }
            | PipelineEvent::SaveFailed { .. }
            | PipelineEvent::ConvertFailed { .. }
            | PipelineEvent::OpenFailed { .. }
    )
}

pub fn create_progress_bar(total: u64, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after a batch.
pub fn print_summary(report: &BatchReport) {
    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Written:      {:>8}", report.written);
    if report.open_failed > 0 {
        eprintln!("    Open failed:  {:>8}", report.open_failed);
    }
    if report.convert_failed > 0 {
        eprintln!("    Conv failed:  {:>8}", report.convert_failed);
    }
    if report.save_failed > 0 {
        eprintln!("    Save failed:  {:>8}", report.save_failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Inputs:       {:>8}", report.inputs);
    eprintln!("    Duration:     {:>7.1}s", report.total_seconds);
    eprintln!("    Rate:         {:>7.1} img/sec", report.images_per_second);
    if report.cancelled {
        eprintln!("    Cancelled before all inputs were drained");
    }
    eprintln!("  ====================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use webpify_core::PipelineError;

    #[test]
    fn bar_advances_on_terminal_events_only() {
        let bar = ProgressBar::hidden();
        bar.set_length(3);
        let observer = ProgressObserver::new(bar.clone());
        let path = Path::new("a.jpg");

        observer.record(PipelineEvent::Opened { path });
        observer.record(PipelineEvent::Converted { path, bytes: 10 });
        assert_eq!(bar.position(), 0);

        observer.record(PipelineEvent::Saved {
            source: path,
            dest: Path::new("out/a.webp"),
        });
        let error = PipelineError::Decode {
            path: "b.jpg".into(),
            message: "bad".into(),
        };
        observer.record(PipelineEvent::ConvertFailed { error: &error });
        assert_eq!(bar.position(), 2);
    }

    #[test]
    fn hidden_bar_when_disabled() {
        assert!(create_progress_bar(5, false).is_hidden());
    }
}
