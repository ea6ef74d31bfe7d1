//! CLI enum types for the convert command.

use clap::ValueEnum;
use webpify_core::TargetFormat;

/// Encodings selectable with `--format`.
#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Lossy WebP (default)
    #[default]
    Webp,
    /// Keep JPEG output (no re-encode)
    Jpeg,
    /// Keep PNG output (no re-encode)
    Png,
}

impl From<FormatArg> for TargetFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Webp => TargetFormat::WebP,
            FormatArg::Jpeg => TargetFormat::Jpeg,
            FormatArg::Png => TargetFormat::Png,
        }
    }
}

impl std::fmt::Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        TargetFormat::from(*self).fmt(f)
    }
}
