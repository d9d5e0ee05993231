pub mod error;
pub mod job;
pub mod language;
pub mod service;

pub use error::SynthesisError;
pub use job::{JobRequest, JobResponse, JobStatus};
pub use language::LanguageId;
pub use service::{SynthesisLimits, SynthesisService, SynthesisServiceApi};

use crate::domain::audio::ReferenceAudio;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EXAGGERATION: f32 = 0.5;
pub const DEFAULT_CFG_WEIGHT: f32 = 0.5;

/// Body of one synthesis invocation.
///
/// Every field is optional on the wire so that missing values surface as
/// validation errors with a useful message instead of a deserializer error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesisRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id: Option<String>,
    /// Base64-encoded WAV used for zero-shot voice cloning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exaggeration: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg_weight: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResponse {
    pub audio_base64: String,
    pub sample_rate: u32,
    pub duration_seconds: f64,
}

/// A validated request, ready to hand to the model
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub text: String,
    pub language: LanguageId,
    pub reference_audio: Option<ReferenceAudio>,
    /// Emotion intensity
    pub exaggeration: f32,
    /// Classifier-free guidance weight, controls pace and style adherence
    pub cfg_weight: f32,
}

impl GenerationRequest {
    /// Length of the text in characters
    pub fn text_length(&self) -> usize {
        self.text.chars().count()
    }
}
