use crate::domain::audio::AudioError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Inference(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SynthesisError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SynthesisError::Invalid(_))
    }
}

impl From<AudioError> for SynthesisError {
    fn from(err: AudioError) -> Self {
        SynthesisError::Invalid(err.to_string())
    }
}

impl From<SynthesisError> for AppError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::Invalid(msg) => AppError::InvalidInput(msg),
            SynthesisError::Inference(msg) => AppError::Inference(msg),
            SynthesisError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
