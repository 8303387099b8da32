//! Audio clip representation
//!
//! An [`AudioClip`] pairs interleaved samples with the sample rate they are
//! declared to play at. The speed adjustment in this crate re-tags the same
//! samples with a higher rate instead of resampling them, so playback speed
//! and pitch shift by the same ratio. That pitch shift is the intended
//! behavior of the tool, not an artifact to correct.

use crate::error::{PrestoError, Result};

/// Decoded audio: interleaved f32 samples plus their declared playback spec.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    /// Interleaved samples, `channels` per frame.
    pub samples: Vec<f32>,
    /// Declared playback rate in Hz.
    pub sample_rate: u32,
    /// Channel count (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Bit depth of the source file, if the decoder reported one.
    pub bits_per_sample: Option<u16>,
}

impl AudioClip {
    /// Create a clip from interleaved samples.
    pub fn new(
        samples: Vec<f32>,
        sample_rate: u32,
        channels: u16,
        bits_per_sample: Option<u16>,
    ) -> Self {
        AudioClip {
            samples,
            sample_rate,
            channels,
            bits_per_sample,
        }
    }

    /// Number of frames (samples per channel).
    pub fn num_frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    /// Playback duration at the declared sample rate.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames() as f64 / self.sample_rate as f64
    }

    /// Check if the clip has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Re-tag this clip's samples with a different playback rate.
    ///
    /// The samples are untouched; only the declared rate changes. Playing
    /// the result shifts speed and pitch by the ratio of the two rates.
    pub fn with_sample_rate(self, sample_rate: u32) -> Self {
        AudioClip {
            sample_rate,
            ..self
        }
    }

    /// Clip re-tagged at `round(sample_rate * factor)` Hz.
    ///
    /// For factor > 1 the result plays faster (and higher-pitched) than the
    /// original; for factor < 1, slower and lower.
    ///
    /// # Errors
    /// * `InvalidSpeedFactor` - if `factor` is not a positive finite number
    pub fn speed_adjusted(self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PrestoError::InvalidSpeedFactor { factor });
        }

        let new_rate = (self.sample_rate as f64 * factor).round() as u32;
        Ok(self.with_sample_rate(new_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_clip(sample_rate: u32, frames: usize) -> AudioClip {
        AudioClip::new(vec![0.25; frames], sample_rate, 1, Some(16))
    }

    #[test]
    fn test_speed_adjusted_rounds_rate() {
        let clip = test_clip(44100, 1000).speed_adjusted(1.15).unwrap();
        assert_eq!(clip.sample_rate, 50715);
    }

    #[test]
    fn test_speed_adjusted_keeps_samples() {
        let original = test_clip(44100, 1000);
        let samples_before = original.samples.clone();

        let adjusted = original.speed_adjusted(1.15).unwrap();

        assert_eq!(adjusted.samples, samples_before);
        assert_eq!(adjusted.channels, 1);
        assert_eq!(adjusted.bits_per_sample, Some(16));
    }

    #[test]
    fn test_speed_adjusted_shortens_duration() {
        let original = test_clip(44100, 88200);
        assert_relative_eq!(original.duration_secs(), 2.0, epsilon = 1e-9);

        let adjusted = original.speed_adjusted(2.0).unwrap();
        assert_relative_eq!(adjusted.duration_secs(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_speed_adjusted_rejects_bad_factors() {
        for factor in [0.0, -1.15, f64::NAN, f64::INFINITY] {
            let result = test_clip(44100, 100).speed_adjusted(factor);
            assert!(result.is_err(), "factor {} should be rejected", factor);
        }
    }

    #[test]
    fn test_num_frames_stereo() {
        let clip = AudioClip::new(vec![0.0; 200], 48000, 2, None);
        assert_eq!(clip.num_frames(), 100);
    }

    #[test]
    fn test_empty_clip() {
        let clip = AudioClip::new(Vec::new(), 44100, 1, None);
        assert!(clip.is_empty());
        assert_eq!(clip.duration_secs(), 0.0);
    }
}
