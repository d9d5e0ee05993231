use crate::domain::audio::Waveform;
use crate::domain::synthesis::GenerationRequest;
use async_trait::async_trait;
use std::sync::Arc;

/// A loaded text-to-speech model.
/// Abstracts the inference backend (Chatterbox runtime, test doubles, etc.)
///
/// Implementations are responsible for:
/// - Holding whatever was loaded at startup for the life of the process
/// - Passing the reference clip to the model for voice cloning
/// - Returning mono audio at `sample_rate()`
///
/// `generate` takes `&self`: a model is shared read-only between requests.
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Native output rate of the model in Hz
    fn sample_rate(&self) -> u32;

    /// Synthesize a validated request
    ///
    /// # Errors
    /// Returns error if inference fails or the backend is unavailable
    async fn generate(&self, request: &GenerationRequest) -> Result<Waveform, String>;

    /// Whether the backend currently answers
    async fn is_ready(&self) -> bool;
}

/// The process-wide model, loaded once at startup
pub type ModelHandle = Arc<dyn SpeechModel>;
