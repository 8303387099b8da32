//! Presto - Batch Audio Speed Adjuster
//!
//! Speeds up every audio file in a directory by a fixed factor, in place,
//! after moving the originals into a `slower/` backup folder.
//!
//! The speed change is a sample-rate reinterpretation: the decoded samples
//! are written back unchanged, tagged with a proportionally higher rate.
//! Playback speed and pitch shift together; no time-stretching is done.
//!
//! # Pipeline
//!
//! enumerate audio files -> ensure backup folder -> per file:
//! back up original (idempotent) -> decode backup -> re-tag sample rate ->
//! encode to the original path. One file failing never aborts the batch.

pub mod audio;
pub mod batch;
pub mod cli;
pub mod error;

pub use error::{PrestoError, Result};
