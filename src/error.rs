//! Error handling for Presto
//!
//! Errors split into two families: discovery errors that abort a whole
//! batch run, and per-file errors that the batch loop reports and skips.

use thiserror::Error;

/// Result type alias for Presto operations
pub type Result<T> = std::result::Result<T, PrestoError>;

/// Main error type for Presto operations
#[derive(Error, Debug)]
pub enum PrestoError {
    // Discovery Errors (fatal for the run)
    #[error("Cannot read directory: {path}")]
    DirectoryUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create backup folder: {path}")]
    BackupDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Per-File Errors (reported, batch continues)
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Audio contains no samples")]
    EmptyAudio,

    #[error("Backup copy does not match source: {path}")]
    BackupMismatch { path: String },

    // Configuration Errors
    #[error("Speed factor must be positive, got {factor}")]
    InvalidSpeedFactor { factor: f64 },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PrestoError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            PrestoError::DirectoryUnreadable { .. } => "DIRECTORY_UNREADABLE",
            PrestoError::BackupDirFailed { .. } => "BACKUP_DIR_FAILED",
            PrestoError::FileNotFound { .. } => "FILE_NOT_FOUND",
            PrestoError::InvalidAudio { .. } => "INVALID_AUDIO",
            PrestoError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            PrestoError::EmptyAudio => "EMPTY_AUDIO",
            PrestoError::BackupMismatch { .. } => "BACKUP_MISMATCH",
            PrestoError::InvalidSpeedFactor { .. } => "INVALID_SPEED_FACTOR",
            PrestoError::Io(_) => "IO_ERROR",
        }
    }

    /// Check if the batch loop can report this error and move on to the
    /// next file. Discovery and configuration errors abort the run instead.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            PrestoError::DirectoryUnreadable { .. }
                | PrestoError::BackupDirFailed { .. }
                | PrestoError::InvalidSpeedFactor { .. }
        )
    }
}
