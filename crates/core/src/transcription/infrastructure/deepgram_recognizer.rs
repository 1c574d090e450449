use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::shared::provider_config::AsrConfig;
use crate::shared::provider_error::ProviderError;
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;

const PROVIDER: &str = "speech recognition";

/// Speech recognizer backed by Deepgram's pre-recorded `listen` endpoint.
///
/// Uploads the whole file in one request and hands back the JSON body
/// untouched.
#[derive(Debug)]
pub struct DeepgramRecognizer {
    client: Client,
    config: AsrConfig,
    api_key: String,
}

impl DeepgramRecognizer {
    pub fn new(config: AsrConfig, api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ProviderError::Client)?;
        Ok(Self {
            client,
            config,
            api_key: api_key.into(),
        })
    }

    pub fn request_url(&self) -> String {
        listen_url(&self.config)
    }
}

fn listen_url(config: &AsrConfig) -> String {
    format!(
        "{}?language={}&model={}",
        config.endpoint, config.language, config.model
    )
}

impl SpeechRecognizer for DeepgramRecognizer {
    fn transcribe(
        &self,
        audio_path: &Path,
    ) -> Result<Option<serde_json::Value>, Box<dyn std::error::Error>> {
        let audio = fs::read(audio_path)
            .map_err(|e| format!("Failed to read audio {}: {e}", audio_path.display()))?;
        let url = self.request_url();
        log::debug!("Sending {} bytes of audio to {url}", audio.len());

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, &self.config.content_type)
            .header(AUTHORIZATION, format!("Token {}", self.api_key))
            .body(audio)
            .send()
            .map_err(|e| ProviderError::Request {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Speech recognition returned HTTP {status}; treating as no result");
            return Ok(None);
        }

        let payload = response
            .json::<serde_json::Value>()
            .map_err(|e| ProviderError::Decode {
                provider: PROVIDER,
                source: e,
            })?;
        Ok(Some(payload))
    }
}
