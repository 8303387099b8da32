//! Audio file encoding
//!
//! The output format is chosen solely from the target path's extension,
//! compared case-insensitively. WAV is the only format the writer can
//! produce; recognized-but-unwritable extensions surface as
//! `UnsupportedFormat` so the batch loop can report them and move on.
//! WAV output uses the clip's source bit depth (16 when unknown).

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use log::debug;

use crate::audio::clip::AudioClip;
use crate::error::{PrestoError, Result};

/// Formats the writer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Wav,
}

impl OutputFormat {
    /// Determine the output format from a file extension.
    ///
    /// # Errors
    /// * `UnsupportedFormat` - if no encoder exists for the extension
    pub fn from_extension(ext: &str) -> Result<Self> {
        if ext.eq_ignore_ascii_case("wav") {
            Ok(OutputFormat::Wav)
        } else {
            Err(PrestoError::UnsupportedFormat {
                format: format!("{} (writing supports: wav)", ext.to_lowercase()),
            })
        }
    }

    /// Determine the output format from a target path's extension.
    pub fn for_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| PrestoError::UnsupportedFormat {
                format: format!("no extension on {}", path.display()),
            })?;
        Self::from_extension(ext)
    }
}

/// Write a clip to `path` in the format implied by the path's extension.
///
/// # Arguments
/// * `clip` - The audio to write, at its declared sample rate
/// * `path` - Target file path; its extension selects the encoder
///
/// # Errors
/// * `UnsupportedFormat` - If the extension has no encoder or the clip's
///   bit depth is not 16, 24, or 32
/// * `Io` - If the file cannot be written
pub fn encode_audio(clip: &AudioClip, path: &Path) -> Result<()> {
    match OutputFormat::for_path(path)? {
        OutputFormat::Wav => write_wav(clip, path),
    }
}

fn write_wav(clip: &AudioClip, path: &Path) -> Result<()> {
    let bit_depth = clip.bits_per_sample.unwrap_or(16);

    if !matches!(bit_depth, 16 | 24 | 32) {
        return Err(PrestoError::UnsupportedFormat {
            format: format!("{}-bit audio (only 16, 24, 32 supported)", bit_depth),
        });
    }

    let spec = WavSpec {
        channels: clip.channels,
        sample_rate: clip.sample_rate,
        bits_per_sample: bit_depth,
        sample_format: if bit_depth == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };

    let mut writer = WavWriter::create(path, spec).map_err(hound_to_io)?;

    match bit_depth {
        16 => {
            for &sample in &clip.samples {
                let scaled = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
                writer.write_sample(scaled).map_err(hound_to_io)?;
            }
        }
        24 => {
            // 24-bit stored as i32 in hound
            for &sample in &clip.samples {
                let scaled = (sample * 8388607.0).clamp(-8388608.0, 8388607.0) as i32;
                writer.write_sample(scaled).map_err(hound_to_io)?;
            }
        }
        // 32-bit, written as float
        _ => {
            for &sample in &clip.samples {
                writer.write_sample(sample).map_err(hound_to_io)?;
            }
        }
    }

    writer.finalize().map_err(hound_to_io)?;

    debug!("wrote {} at {} Hz", path.display(), clip.sample_rate);
    Ok(())
}

fn hound_to_io(e: hound::Error) -> PrestoError {
    PrestoError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        e.to_string(),
    ))
}
