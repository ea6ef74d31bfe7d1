//! Logging setup for the CLI.
//!
//! Log records go to stderr so stdout stays free for command output. The
//! filter comes from `RUST_LOG` when set, otherwise from `[logging] level`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber from the `[logging]` config section.
///
/// `--verbose` raises the configured level to at least DEBUG, and
/// `--json-logs` forces JSON output.
pub fn init_from_config(config: &webpify_core::Config, verbose: bool, json_logs: bool) {
    let level = default_level(&config.logging.level, verbose);
    let json = json_logs || config.logging.format.eq_ignore_ascii_case("json");
    init(level, json);
}

/// Level used when `RUST_LOG` is unset. Unrecognised names fall back to INFO.
fn default_level(configured: &str, verbose: bool) -> LevelFilter {
    let level = configured.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    if verbose {
        level.max(LevelFilter::DEBUG)
    } else {
        level
    }
}

fn init(level: LevelFilter, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
