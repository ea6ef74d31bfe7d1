//! Converter setup: CLI overrides on top of the loaded config.

use webpify_core::{BatchConverter, Config, ConvertRequest, FileDiscovery};

use super::ConvertArgs;

/// Fold command-line flags into the config. Flags win over file values.
pub fn apply_overrides(config: &mut Config, args: &ConvertArgs) {
    if let Some(ref dir) = args.output {
        config.output.dir = dir.clone();
    }
    if let Some(format) = args.format {
        config.conversion.target_format = format.into();
    }
    if let Some(width) = args.width {
        config.conversion.width = width;
    }
    if let Some(height) = args.height {
        config.conversion.height = height;
    }
    if let Some(workers) = args.workers {
        config.pipeline.workers = workers;
    }
    if args.unordered {
        config.pipeline.preserve_order = false;
    }
}

/// Expand inputs and assemble a validated converter.
///
/// Returns `None` when no inputs remain after directory expansion.
pub fn setup_converter(
    mut config: Config,
    args: &ConvertArgs,
) -> anyhow::Result<Option<BatchConverter>> {
    apply_overrides(&mut config, args);
    config.validate()?;

    let discovery = FileDiscovery::new(config.processing.clone());
    let inputs = discovery.expand(&args.inputs);
    if inputs.is_empty() {
        tracing::warn!("No supported image files found in {:?}", args.inputs);
        return Ok(None);
    }
    tracing::info!("Found {} image(s) to convert", inputs.len());

    let request = ConvertRequest::from_config(&config, inputs);
    if request.options.is_noop() {
        tracing::warn!(
            "Target format {} with no resize leaves images unchanged; inputs will be copied",
            config.conversion.target_format
        );
    }
    tracing::debug!(
        "Options: {:?}, output: {:?}, workers: {}",
        request.options.steps(),
        request.output_dir,
        config.pipeline.workers
    );

    Ok(Some(BatchConverter::new(config, request)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::convert::FormatArg;
    use std::path::PathBuf;
    use webpify_core::TargetFormat;

    #[test]
    fn no_flags_leave_config_untouched() {
        let mut config = Config::default();
        apply_overrides(&mut config, &ConvertArgs::default());

        assert_eq!(config.output.dir, PathBuf::from("results"));
        assert_eq!(config.conversion.target_format, TargetFormat::WebP);
        assert_eq!(config.conversion.width, 0);
        assert_eq!(config.pipeline.workers, 1);
        assert!(config.pipeline.preserve_order);
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        let args = ConvertArgs {
            output: Some(PathBuf::from("/tmp/out")),
            format: Some(FormatArg::Png),
            width: Some(50),
            height: Some(40),
            workers: Some(4),
            unordered: true,
            ..ConvertArgs::default()
        };
        apply_overrides(&mut config, &args);

        assert_eq!(config.output.dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.conversion.target_format, TargetFormat::Png);
        assert_eq!(config.conversion.width, 50);
        assert_eq!(config.conversion.height, 40);
        assert_eq!(config.pipeline.workers, 4);
        assert!(!config.pipeline.preserve_order);
    }

    #[test]
    fn zero_workers_fail_validation() {
        let args = ConvertArgs {
            inputs: vec![PathBuf::from("a.jpg")],
            workers: Some(0),
            ..ConvertArgs::default()
        };
        assert!(setup_converter(Config::default(), &args).is_err());
    }

    #[test]
    fn empty_directory_yields_no_converter() {
        let dir = tempfile::tempdir().unwrap();
        let args = ConvertArgs {
            inputs: vec![dir.path().to_path_buf()],
            ..ConvertArgs::default()
        };
        assert!(setup_converter(Config::default(), &args).unwrap().is_none());
    }
}
