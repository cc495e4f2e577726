// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hirewire - webhook ingestion for voice onboarding calls.
//!
//! This is the binary entry point for the Hirewire service.

mod check;
mod replay;
mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hirewire_config::HirewireConfig;

/// Hirewire - webhook ingestion for voice onboarding calls.
#[derive(Parser, Debug)]
#[command(name = "hirewire", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Validate configuration and check the database.
    CheckConfig {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Re-run question extraction for a stored webhook payload.
    Replay {
        /// Path to a `post_call_transcription` JSON payload.
        payload: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> HirewireConfig {
    let loaded = match path {
        Some(path) => hirewire_config::load_and_validate_path(path),
        None => hirewire_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            hirewire_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::CheckConfig { plain }) => check::run_check_config(&config, plain).await,
        Some(Commands::Replay { payload }) => replay::run_replay(&config, &payload).await,
        None => {
            println!("hirewire: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
