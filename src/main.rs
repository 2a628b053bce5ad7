// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "vaapi-probe")]
#[command(about = "Inspect VA-API display capabilities")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the image formats this library knows, in score order
    Formats {
        /// Only show this format (name or fourcc)
        format: Option<String>,
    },

    /// Run discovery against a driver fixture and print its capabilities
    Probe {
        /// Driver fixture (JSON)
        fixture: PathBuf,

        /// Discovery options (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=vaapi_display=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Formats { format } => cli::list_formats(format.as_deref()),
        Commands::Probe { fixture, config } => cli::probe(&fixture, config.as_deref()),
    }
}
