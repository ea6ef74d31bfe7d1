//! The `webpify convert` command for batch conversion.

mod progress;
mod setup;
pub mod types;

pub use types::FormatArg;

use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use webpify_core::{BatchReport, Config};

use progress::{create_progress_bar, print_summary, ProgressObserver};
use setup::setup_converter;

/// Arguments for the `convert` command.
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Image files or directories to convert
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory (defaults to `output.dir` from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target encoding
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Resize width in pixels (0 derives it from the height)
    #[arg(long)]
    pub width: Option<u32>,

    /// Resize height in pixels (0 derives it from the width)
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of images converted concurrently
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Write results as soon as they finish instead of in input order
    #[arg(long)]
    pub unordered: bool,

    /// Write a JSON batch report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Execute the convert command.
pub async fn execute(args: ConvertArgs, config: Config) -> anyhow::Result<()> {
    let Some(converter) = setup_converter(config, &args)? else {
        return Ok(());
    };

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, finishing in-flight images...");
                cancel.cancel();
            }
        })
    };

    let bar = create_progress_bar(converter.input_count() as u64, !args.no_progress);
    let report = converter
        .with_observer(Arc::new(ProgressObserver::new(bar.clone())))
        .run_with_cancel(cancel)
        .await;
    bar.finish_and_clear();
    ctrl_c.abort();

    print_summary(&report);

    if let Some(ref path) = args.report {
        write_report(path, &report)?;
        tracing::info!("Report written to {:?}", path);
    }

    Ok(())
}

fn write_report(path: &Path, report: &BatchReport) -> anyhow::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        args: ConvertArgs,
    }

    #[test]
    fn parse_defaults_leave_overrides_unset() {
        let cli = TestCli::parse_from(["webpify", "a.jpg", "b.png"]);
        assert_eq!(
            cli.args.inputs,
            vec![PathBuf::from("a.jpg"), PathBuf::from("b.png")]
        );
        assert!(cli.args.output.is_none());
        assert!(cli.args.format.is_none());
        assert!(cli.args.width.is_none());
        assert!(cli.args.workers.is_none());
        assert!(!cli.args.unordered);
        assert!(!cli.args.no_progress);
    }

    #[test]
    fn parse_all_flags() {
        let cli = TestCli::parse_from([
            "webpify",
            "photos",
            "-o",
            "web",
            "--format",
            "png",
            "--width",
            "800",
            "--height",
            "0",
            "-w",
            "4",
            "--unordered",
            "--report",
            "report.json",
        ]);
        assert_eq!(cli.args.output, Some(PathBuf::from("web")));
        assert_eq!(cli.args.format, Some(FormatArg::Png));
        assert_eq!(cli.args.width, Some(800));
        assert_eq!(cli.args.height, Some(0));
        assert_eq!(cli.args.workers, Some(4));
        assert!(cli.args.unordered);
        assert_eq!(cli.args.report, Some(PathBuf::from("report.json")));
    }

    #[test]
    fn inputs_are_required() {
        assert!(TestCli::try_parse_from(["webpify"]).is_err());
    }

    #[tokio::test]
    async fn execute_converts_and_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("photo.png");
        image::DynamicImage::new_rgb8(20, 10).save(&input).unwrap();
        let out = dir.path().join("out");
        let report_path = dir.path().join("report.json");

        let args = ConvertArgs {
            inputs: vec![input],
            output: Some(out.clone()),
            width: Some(10),
            report: Some(report_path.clone()),
            no_progress: true,
            ..ConvertArgs::default()
        };
        execute(args, Config::default()).await.unwrap();

        assert!(out.join("photo.webp").exists());
        let report: BatchReport =
            serde_json::from_str(&std::fs::read_to_string(report_path).unwrap()).unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(report.outputs, vec![out.join("photo.webp")]);
    }
}
