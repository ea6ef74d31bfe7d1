//! webpify CLI - batch image converter.
//!
//! Reads images, optionally resizes them, re-encodes them as lossy WebP and
//! writes the results to an output directory.
//!
//! # Usage
//!
//! ```bash
//! # Convert two images into ./results
//! webpify convert test1.jpeg test2.jpeg
//!
//! # Resize to 800px wide and convert a whole directory
//! webpify convert ./photos/ --width 800 --output ./web
//!
//! # View configuration
//! webpify config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// webpify - resize and re-encode images to WebP in batches.
#[derive(Parser, Debug)]
#[command(name = "webpify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert images
    Convert(cli::convert::ConvertArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match webpify_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `webpify config path`."
            );
            webpify_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("webpify v{}", webpify_core::VERSION);

    match cli.command {
        Commands::Convert(args) => cli::convert::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
