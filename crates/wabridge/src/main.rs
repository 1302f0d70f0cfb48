// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! wabridge - normalizes messaging transport events for downstream consumers.
//!
//! The binary replays recorded transport events through the event router and
//! prints the resulting records as JSON lines on stdout.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod offline;
mod replay;
mod sink;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wabridge_config::WabridgeConfig;

/// wabridge - messaging transport event bridge.
#[derive(Parser, Debug)]
#[command(name = "wabridge", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Route recorded events (one `{"type", "data"}` object per line).
    Replay {
        /// Newline-delimited JSON event file.
        file: PathBuf,
    },
    /// Validate the configuration and exit.
    CheckConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => wabridge_config::load_and_validate_path(path),
        None => wabridge_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            wabridge_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    match cli.command {
        Some(Commands::Replay { file }) => {
            if let Err(e) = replay::run(&config, &file).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::CheckConfig) => print_config_summary(&config),
        None => {
            println!("wabridge: use --help for available commands");
        }
    }
}

fn print_config_summary(config: &WabridgeConfig) {
    println!("config ok");
    println!("  account number: {}", config.connection.number);
    println!("  session store:  {}", config.connection.database_path);
    println!("  media path:     {}", config.media.path);
    for (mime, ext) in &config.media.extensions {
        println!("  extension:      {mime} -> {ext}");
    }
}

/// Logs go to stderr; stdout carries the records.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wabridge={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
