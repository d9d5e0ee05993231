use super::{SynthesisError, SynthesisRequest, SynthesisResponse};
use crate::error::ErrorResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope the serverless platform wraps around each invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: String,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<SynthesisResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl JobRequest {
    /// Accept either a full `{"id", "input"}` envelope or a bare request body,
    /// which is how local test inputs are usually written.
    ///
    /// Anything with an `input` key is an envelope and must parse as one.
    pub fn from_test_input(value: Value) -> Result<Self, SynthesisError> {
        let is_envelope = value
            .as_object()
            .map_or(false, |map| map.contains_key("input"));
        if is_envelope {
            return serde_json::from_value(value)
                .map_err(|e| SynthesisError::Invalid(format!("Malformed job envelope: {}", e)));
        }
        Ok(JobRequest {
            id: None,
            input: Some(value),
        })
    }

    pub fn synthesis_request(&self) -> Result<SynthesisRequest, SynthesisError> {
        let input = self
            .input
            .as_ref()
            .filter(|v| !v.is_null())
            .ok_or_else(|| SynthesisError::Invalid("Missing 'input' object".to_string()))?;

        serde_json::from_value(input.clone())
            .map_err(|e| SynthesisError::Invalid(format!("Malformed input: {}", e)))
    }
}

impl JobResponse {
    pub fn completed(id: String, output: SynthesisResponse) -> Self {
        Self {
            id,
            status: JobStatus::Completed,
            output: Some(output),
            error: None,
        }
    }

    pub fn failed(id: String, error: ErrorResponse) -> Self {
        Self {
            id,
            status: JobStatus::Failed,
            output: None,
            error: Some(error),
        }
    }
}
