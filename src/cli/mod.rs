//! CLI Module
//!
//! Command-line interface for the Presto batch speed adjuster. The tool
//! takes no required arguments: it operates on the directory containing
//! the executable, and the speed factor is a compiled-in constant.

pub mod commands;

use clap::Parser;

/// Presto - speeds up the audio files next to the executable, in place
#[derive(Parser, Debug)]
#[command(name = "presto")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
