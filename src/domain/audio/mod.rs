pub mod wav;

pub use wav::{decode_reference_audio, decode_wav, encode_wav, encode_wav_base64};

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("reference_audio is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("reference_audio is {size} bytes, limit is {max}")]
    TooLarge { size: usize, max: usize },
    #[error("not a valid WAV stream: {0}")]
    InvalidWav(String),
    #[error("audio contains no samples")]
    Empty,
    #[error("failed to encode WAV: {0}")]
    Encode(String),
}

/// Mono audio as produced by the model, samples in [-1.0, 1.0]
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// A caller-supplied voice sample that has been checked to be readable WAV.
///
/// `wav_bytes` holds the caller's bytes unmodified.
#[derive(Debug, Clone)]
pub struct ReferenceAudio {
    pub wav_bytes: Vec<u8>,
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_seconds: f64,
}
