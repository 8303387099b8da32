//! Batch speed adjustment of audio files in a directory
//!
//! The run is strictly sequential: enumerate audio files, ensure the
//! `slower/` backup folder exists, then per file: move the original into
//! the backup folder (first run only), decode the backup, re-tag it at
//! `rate * factor`, and write the result back to the original path. A
//! failure on one file is reported and the batch moves on; only an
//! unreadable directory or an uncreatable backup folder aborts the run.
//!
//! The backup is idempotent: an existing backup is never overwritten and
//! serves as the source of truth when a file is processed again.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::audio::{decode_audio, encode_audio};
use crate::error::{PrestoError, Result};

/// Playback speed multiplier applied to every file in a run.
pub const SPEED_FACTOR: f64 = 1.15;

/// Name of the backup folder holding the untouched originals.
pub const BACKUP_DIR_NAME: &str = "slower";

/// Extensions recognized as audio files (compared case-insensitively).
pub const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "wav", "m4a", "ogg", "flac"];

/// Outcome counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Audio files selected for processing.
    pub found: usize,
    /// Files transformed and written back successfully.
    pub processed: usize,
    /// Files that hit a per-file error and were skipped.
    pub failed: usize,
}

/// Speed up every audio file directly inside `dir` by `factor`.
///
/// `skip_name` excludes a single file name from discovery (the running
/// executable, when it lives in the same directory).
///
/// # Errors
/// * `InvalidSpeedFactor` - If `factor` is not a positive finite number
/// * `DirectoryUnreadable` - If `dir` cannot be enumerated
/// * `BackupDirFailed` - If the backup folder cannot be created
///
/// Per-file errors are counted in the returned [`BatchSummary`], not
/// returned.
pub fn run(dir: &Path, factor: f64, skip_name: Option<&OsStr>) -> Result<BatchSummary> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(PrestoError::InvalidSpeedFactor { factor });
    }

    let files = discover_audio_files(dir, skip_name)?;

    let mut summary = BatchSummary {
        found: files.len(),
        ..Default::default()
    };

    if files.is_empty() {
        println!("No audio files found!");
        return Ok(summary);
    }

    println!("Found {} audio file(s)\n", files.len());

    let backup_dir = ensure_backup_dir(dir)?;
    println!("Created/using backup folder: {}\n", backup_dir.display());

    for file in &files {
        match process_one(file, &backup_dir, factor) {
            Ok(()) => summary.processed += 1,
            Err(e) => {
                summary.failed += 1;
                warn!("{}: {}", file.display(), e);
                println!("  ✗ Error processing {}: {}", display_name(file), e);
            }
        }
    }

    Ok(summary)
}

/// Back up and transform a single file.
fn process_one(file: &Path, backup_dir: &Path, factor: f64) -> Result<()> {
    let name = display_name(file);
    let backup_path = backup_dir.join(file.file_name().unwrap_or(file.as_os_str()));

    if backup_path.exists() {
        // The existing backup is the true original; never overwrite it
        println!("Using existing backup: {}", name);
    } else {
        move_file(file, &backup_path)?;
        println!("Moved original: {} -> {}/", name, BACKUP_DIR_NAME);
    }

    println!("Processing: {}", name);

    let clip = decode_audio(&backup_path)?;
    debug!(
        "  {}: {:.2}s at {} Hz",
        name,
        clip.duration_secs(),
        clip.sample_rate
    );

    let adjusted = clip.speed_adjusted(factor)?;
    encode_audio(&adjusted, file)?;

    println!("  ✓ Completed: {}", name);
    Ok(())
}

/// Enumerate audio files directly inside `dir` (no recursion).
///
/// Only regular files with a recognized extension are returned, sorted by
/// path. The backup folder is a directory, so its contents are never
/// visited at depth 1.
pub fn discover_audio_files(dir: &Path, skip_name: Option<&OsStr>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| PrestoError::DirectoryUnreadable {
            path: dir.display().to_string(),
            source: e.into(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        if skip_name.is_some() && entry.path().file_name() == skip_name {
            continue;
        }
        if is_audio_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Check whether a path has a recognized audio extension.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| AUDIO_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
        .unwrap_or(false)
}

/// Create the backup folder under `dir` if it does not exist.
pub fn ensure_backup_dir(dir: &Path) -> Result<PathBuf> {
    let backup_dir = dir.join(BACKUP_DIR_NAME);
    fs::create_dir_all(&backup_dir).map_err(|e| PrestoError::BackupDirFailed {
        path: backup_dir.display().to_string(),
        source: e,
    })?;
    Ok(backup_dir)
}

/// Move `src` to `dest`.
///
/// Tries a rename first; when that fails (e.g. across filesystems), falls
/// back to copy + checksum verification + delete. On a checksum mismatch
/// the source stays in place so a later run can retry.
fn move_file(src: &Path, dest: &Path) -> Result<()> {
    if fs::rename(src, dest).is_ok() {
        return Ok(());
    }

    debug!("rename failed for {}, copying instead", src.display());
    fs::copy(src, dest)?;

    if file_checksum(src)? != file_checksum(dest)? {
        return Err(PrestoError::BackupMismatch {
            path: dest.display().to_string(),
        });
    }

    fs::remove_file(src)?;
    Ok(())
}

/// SHA-256 digest of a file's contents.
pub fn file_checksum(path: &Path) -> Result<[u8; 32]> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hasher.finalize().into())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use test_case::test_case;

    #[test_case("clip.mp3", true)]
    #[test_case("clip.wav", true)]
    #[test_case("clip.WAV", true)]
    #[test_case("clip.m4a", true)]
    #[test_case("clip.ogg", true)]
    #[test_case("clip.FLAC", true)]
    #[test_case("notes.txt", false)]
    #[test_case("clip.aiff", false)]
    #[test_case("noextension", false)]
    fn test_is_audio_file(name: &str, expected: bool) {
        assert_eq!(is_audio_file(Path::new(name)), expected);
    }

    #[test]
    fn test_discover_skips_directories_and_other_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.wav"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join(BACKUP_DIR_NAME)).unwrap();
        fs::write(dir.path().join(BACKUP_DIR_NAME).join("b.wav"), b"x").unwrap();

        let files = discover_audio_files(dir.path(), None).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "a.wav");
    }

    #[test]
    fn test_discover_excludes_skip_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.wav"), b"x").unwrap();
        fs::write(dir.path().join("b.wav"), b"x").unwrap();

        let files =
            discover_audio_files(dir.path(), Some(OsStr::new("a.wav"))).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "b.wav");
    }

    #[test]
    fn test_ensure_backup_dir_is_idempotent() {
        let dir = tempdir().unwrap();

        let first = ensure_backup_dir(dir.path()).unwrap();
        let second = ensure_backup_dir(dir.path()).unwrap();

        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn test_move_file_removes_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.wav");
        let dest = dir.path().join("moved.wav");
        fs::write(&src, b"payload").unwrap();

        move_file(&src, &dest).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"payload");
    }

    #[test]
    fn test_checksum_detects_difference() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        let c = dir.path().join("c");
        fs::write(&a, b"same").unwrap();
        fs::write(&b, b"same").unwrap();
        fs::write(&c, b"different").unwrap();

        assert_eq!(file_checksum(&a).unwrap(), file_checksum(&b).unwrap());
        assert_ne!(file_checksum(&a).unwrap(), file_checksum(&c).unwrap());
    }

    #[test]
    fn test_run_rejects_bad_factor() {
        let dir = tempdir().unwrap();

        let result = run(dir.path(), 0.0, None);
        assert!(matches!(
            result,
            Err(PrestoError::InvalidSpeedFactor { .. })
        ));
    }
}
