//! Audio domain: in-memory clips, decoding, and encoding.

pub mod clip;
pub mod decode;
pub mod encode;

pub use clip::AudioClip;
pub use decode::decode_audio;
pub use encode::{encode_audio, OutputFormat};
