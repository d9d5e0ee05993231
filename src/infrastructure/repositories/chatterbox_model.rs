use super::speech_model::SpeechModel;
use crate::domain::audio::{decode_wav, Waveform};
use crate::domain::synthesis::GenerationRequest;
use anyhow::Context;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the runtime reports about the model it holds in memory
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub sample_rate: u32,
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    text: &'a str,
    language_id: &'a str,
    audio_prompt: Option<String>,
    exaggeration: f32,
    cfg_weight: f32,
}

/// Chatterbox Multilingual model served by its inference runtime.
///
/// The runtime keeps the pretrained weights resident on the GPU; this type is
/// the worker's handle to it. `load` is called once per process and the
/// resulting value is shared by every request.
pub struct ChatterboxModel {
    client: reqwest::Client,
    base_url: String,
    info: ModelInfo,
}

impl ChatterboxModel {
    /// Connect to the runtime and read the model's properties
    pub async fn load(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;
        let base_url = base_url.trim_end_matches('/').to_string();

        tracing::info!(base_url = %base_url, "Loading Chatterbox Multilingual model");

        let info = fetch_info(&client, &base_url)
            .await
            .with_context(|| format!("Chatterbox runtime at {} is not available", base_url))?;

        tracing::info!(
            sample_rate = info.sample_rate,
            device = info.device.as_deref().unwrap_or("unknown"),
            "Model loaded"
        );

        Ok(Self {
            client,
            base_url,
            info,
        })
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }
}

async fn fetch_info(client: &reqwest::Client, base_url: &str) -> anyhow::Result<ModelInfo> {
    let info = client
        .get(format!("{}/info", base_url))
        .send()
        .await?
        .error_for_status()?
        .json::<ModelInfo>()
        .await?;

    if info.sample_rate == 0 {
        anyhow::bail!("runtime reported a sample rate of 0");
    }
    Ok(info)
}

#[async_trait]
impl SpeechModel for ChatterboxModel {
    fn name(&self) -> &str {
        "chatterbox-multilingual"
    }

    fn sample_rate(&self) -> u32 {
        self.info.sample_rate
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Waveform, String> {
        let body = GenerateBody {
            text: &request.text,
            language_id: request.language.as_str(),
            audio_prompt: request
                .reference_audio
                .as_ref()
                .map(|r| STANDARD.encode(&r.wav_bytes)),
            exaggeration: request.exaggeration,
            cfg_weight: request.cfg_weight,
        };

        tracing::debug!(
            language = %request.language,
            text_length = request.text_length(),
            has_audio_prompt = body.audio_prompt.is_some(),
            "Calling Chatterbox generate"
        );

        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Chatterbox runtime unreachable: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(format!(
                "Chatterbox runtime returned {}: {}",
                status.as_u16(),
                message.trim()
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read Chatterbox audio: {}", e))?;

        decode_wav(&bytes).map_err(|e| format!("Chatterbox returned unusable audio: {}", e))
    }

    async fn is_ready(&self) -> bool {
        match fetch_info(&self.client, &self.base_url).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Chatterbox readiness probe failed");
                false
            }
        }
    }
}
