use super::error::SynthesisError;
use super::language::LanguageId;
use super::{
    GenerationRequest, SynthesisRequest, SynthesisResponse, DEFAULT_CFG_WEIGHT,
    DEFAULT_EXAGGERATION,
};
use crate::domain::audio::{decode_reference_audio, encode_wav_base64};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::ModelHandle;
use async_trait::async_trait;
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct SynthesisLimits {
    pub max_text_chars: usize,
    pub max_reference_audio_bytes: usize,
}

impl Default for SynthesisLimits {
    fn default() -> Self {
        Self {
            max_text_chars: 10_000,
            max_reference_audio_bytes: 10 * 1024 * 1024,
        }
    }
}

impl From<&Config> for SynthesisLimits {
    fn from(config: &Config) -> Self {
        Self {
            max_text_chars: config.max_text_chars,
            max_reference_audio_bytes: config.max_reference_audio_bytes,
        }
    }
}

pub struct SynthesisService {
    model: ModelHandle,
    limits: SynthesisLimits,
}

impl SynthesisService {
    pub fn new(model: ModelHandle, limits: SynthesisLimits) -> Self {
        Self { model, limits }
    }
}

#[async_trait]
pub trait SynthesisServiceApi: Send + Sync {
    /// Turn one request into one complete response.
    ///
    /// This operation:
    /// - Validates text, language and generation parameters
    /// - Decodes and checks the optional reference clip
    /// - Calls the model once, without retrying
    /// - Encodes the waveform as base64 WAV
    ///
    /// Validation failures never reach the model.
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisResponse, SynthesisError>;
}

#[async_trait]
impl SynthesisServiceApi for SynthesisService {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisResponse, SynthesisError> {
        // 1-3. Validate, decode reference audio, apply defaults
        let generation = self.validate(request)?;

        tracing::info!(
            language = %generation.language,
            text_length = generation.text_length(),
            has_reference_audio = generation.reference_audio.is_some(),
            exaggeration = generation.exaggeration,
            cfg_weight = generation.cfg_weight,
            "Synthesis request"
        );

        // 4. Run inference
        let start_time = Instant::now();
        let waveform = self.model.generate(&generation).await.map_err(|e| {
            tracing::error!(model = self.model.name(), error = %e, "Model generate failed");
            SynthesisError::Inference(e)
        })?;

        if waveform.is_empty() {
            return Err(SynthesisError::Inference(
                "model returned empty audio".to_string(),
            ));
        }

        let sample_rate = self.model.sample_rate();
        if waveform.sample_rate != sample_rate {
            return Err(SynthesisError::Inference(format!(
                "model returned audio at {} Hz, expected {} Hz",
                waveform.sample_rate, sample_rate
            )));
        }

        // 5-6. Encode and measure
        let audio_base64 = encode_wav_base64(&waveform)
            .map_err(|e| SynthesisError::Other(anyhow::anyhow!(e)))?;
        let duration_seconds = round_to_centiseconds(waveform.duration_seconds());

        let elapsed = start_time.elapsed();
        tracing::info!(
            model = self.model.name(),
            language = %generation.language,
            latency_ms = elapsed.as_millis(),
            sample_count = waveform.samples.len(),
            duration_seconds = duration_seconds,
            audio_base64_size = audio_base64.len(),
            "Synthesis completed"
        );

        // 7. Respond
        Ok(SynthesisResponse {
            audio_base64,
            sample_rate,
            duration_seconds,
        })
    }
}

impl SynthesisService {
    fn validate(&self, request: SynthesisRequest) -> Result<GenerationRequest, SynthesisError> {
        // Whitespace-only text counts as missing; the model gets the text as sent
        let text = request
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SynthesisError::Invalid("Missing 'text' field".to_string()))?;

        let char_count = text.chars().count();
        if char_count > self.limits.max_text_chars {
            return Err(SynthesisError::Invalid(format!(
                "Text must be {} characters or less, got {}",
                self.limits.max_text_chars, char_count
            )));
        }

        let language = request
            .language_id
            .as_deref()
            .ok_or_else(|| SynthesisError::Invalid("Missing 'language_id' field".to_string()))?
            .parse::<LanguageId>()
            .map_err(|e| SynthesisError::Invalid(e.to_string()))?;

        let exaggeration = unit_interval(
            "exaggeration",
            request.exaggeration.unwrap_or(DEFAULT_EXAGGERATION),
        )?;
        let cfg_weight = unit_interval(
            "cfg_weight",
            request.cfg_weight.unwrap_or(DEFAULT_CFG_WEIGHT),
        )?;

        // An empty string is treated the same as an absent clip
        let reference_audio = match request.reference_audio.as_deref().map(str::trim) {
            Some(encoded) if !encoded.is_empty() => {
                let reference =
                    decode_reference_audio(encoded, self.limits.max_reference_audio_bytes)?;
                tracing::debug!(
                    sample_rate = reference.sample_rate,
                    channels = reference.channels,
                    duration_seconds = reference.duration_seconds,
                    "Reference audio decoded"
                );
                Some(reference)
            }
            _ => None,
        };

        Ok(GenerationRequest {
            text,
            language,
            reference_audio,
            exaggeration,
            cfg_weight,
        })
    }
}

fn unit_interval(field: &str, value: f32) -> Result<f32, SynthesisError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SynthesisError::Invalid(format!(
            "'{}' must be between 0.0 and 1.0, got {}",
            field, value
        )))
    }
}

fn round_to_centiseconds(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}
