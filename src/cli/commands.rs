//! CLI Command Implementations
//!
//! Implements the actual logic for the speedup run.

use std::env;
use std::path::PathBuf;

use log::info;

use crate::batch::{self, BACKUP_DIR_NAME, SPEED_FACTOR};
use crate::error::Result;

/// Speed up every audio file in the directory containing the executable.
pub fn run_speedup() -> Result<()> {
    let exe = env::current_exe()?;
    let dir: PathBuf = match exe.parent() {
        Some(parent) => parent.to_path_buf(),
        None => PathBuf::from("."),
    };
    let skip_name = exe.file_name().map(|n| n.to_os_string());

    info!("working directory: {}", dir.display());

    println!(
        "Speeding up all audio files in {} by {}x...",
        dir.display(),
        SPEED_FACTOR
    );
    println!("{:-<50}", "");

    let summary = batch::run(&dir, SPEED_FACTOR, skip_name.as_deref())?;

    if summary.found > 0 {
        println!("{:-<50}", "");
        println!(
            "Done! Original files are preserved in the '{}' folder.",
            BACKUP_DIR_NAME
        );
        if summary.failed > 0 {
            println!("{} file(s) failed; see messages above.", summary.failed);
        }
    }

    info!(
        "batch finished: {} found, {} processed, {} failed",
        summary.found, summary.processed, summary.failed
    );

    Ok(())
}
