//! Audio file decoding via Symphonia
//!
//! Decodes any container/codec combination Symphonia supports with the
//! enabled features (WAV, FLAC, OGG/Vorbis, MP3, M4A/AAC). The file
//! extension is passed as a probe hint; the first audio track is decoded in
//! full and converted to interleaved 32-bit float.

use std::fs::File;
use std::path::Path;

use log::{debug, warn};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio::clip::AudioClip;
use crate::error::{PrestoError, Result};

/// Decode an audio file into an [`AudioClip`].
///
/// # Arguments
/// * `path` - Path to the audio file to decode
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidAudio` - If the container cannot be probed, the codec is
///   unsupported, or decoding fails beyond a single corrupt packet
/// * `EmptyAudio` - If the file decodes to zero samples
pub fn decode_audio(path: &Path) -> Result<AudioClip> {
    if !path.exists() {
        return Err(PrestoError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| PrestoError::InvalidAudio {
            reason: format!("failed to probe format: {}", e),
            source: Some(Box::new(e)),
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| PrestoError::InvalidAudio {
            reason: "no audio track found".to_string(),
            source: None,
        })?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| PrestoError::InvalidAudio {
            reason: "track declares no sample rate".to_string(),
            source: None,
        })?;
    let bits_per_sample = codec_params.bits_per_sample.map(|b| b as u16);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| PrestoError::InvalidAudio {
            reason: format!("unsupported codec: {}", e),
            source: Some(Box::new(e)),
        })?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut channels: u16 = codec_params.channels.map(|c| c.count() as u16).unwrap_or(0);

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(PrestoError::InvalidAudio {
                    reason: format!("failed to read packet: {}", e),
                    source: Some(Box::new(e)),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                if sample_buf.is_none() {
                    let spec = *decoded.spec();
                    channels = spec.channels.count() as u16;
                    sample_buf = Some(SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
                }

                if let Some(buf) = sample_buf.as_mut() {
                    buf.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buf.samples());
                }
            }
            // Decode errors are scoped to a single packet
            Err(SymphoniaError::DecodeError(e)) => {
                warn!("skipping corrupt packet in {}: {}", path.display(), e);
            }
            Err(e) => {
                return Err(PrestoError::InvalidAudio {
                    reason: format!("decode failed: {}", e),
                    source: Some(Box::new(e)),
                });
            }
        }
    }

    if samples.is_empty() {
        return Err(PrestoError::EmptyAudio);
    }

    debug!(
        "decoded {}: {} Hz, {} channel(s), {} frames",
        path.display(),
        sample_rate,
        channels,
        samples.len() / channels.max(1) as usize
    );

    Ok(AudioClip::new(samples, sample_rate, channels, bits_per_sample))
}
