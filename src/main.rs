//! Presto CLI - Batch Audio Speed Adjuster
//!
//! Speeds up the audio files in the executable's directory, keeping the
//! originals in a `slower/` backup folder.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use presto::cli::{commands, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Presto Audio Speedup v{}", env!("CARGO_PKG_VERSION"));

    commands::run_speedup().context("batch run failed")?;

    Ok(())
}
