use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;

use super::prompts::{system_prompt, user_message};
use crate::analysis::domain::comparative_analyzer::{
    ComparativeAnalyzer, OracleResponse, TokenUsage,
};
use crate::shared::provider_config::AnalysisConfig;
use crate::shared::provider_error::ProviderError;

const PROVIDER: &str = "comparative analysis";

#[derive(Debug, Serialize, PartialEq)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize, PartialEq)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

/// Comparative analyzer backed by an OpenAI-compatible chat completions API.
#[derive(Debug)]
pub struct ChatCompletionsAnalyzer {
    client: Client,
    config: AnalysisConfig,
    api_key: String,
}

impl ChatCompletionsAnalyzer {
    pub fn new(config: AnalysisConfig, api_key: impl Into<String>) -> Result<Self, ProviderError> {
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

    fn request<'a>(&'a self, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt(self.config.prompt_dialect),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        }
    }
}

/// Pull the first choice's text and the usage block out of a completion body.
fn parse_completion(body: &Value) -> OracleResponse {
    let content = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string);
    let usage = body
        .get("usage")
        .and_then(|u| serde_json::from_value::<TokenUsage>(u.clone()).ok());
    OracleResponse { content, usage }
}

impl ComparativeAnalyzer for ChatCompletionsAnalyzer {
    fn analyze(
        &self,
        reference_text: &str,
        transcript: &str,
    ) -> Result<OracleResponse, Box<dyn std::error::Error>> {
        let user = user_message(reference_text, transcript);
        let url = &self.config.endpoint;
        log::debug!(
            "Requesting {} analysis from {url} ({})",
            self.config.prompt_dialect,
            self.config.model
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&self.request(&user))
            .send()
            .map_err(|e| ProviderError::Request {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = response.json::<Value>().map_err(|e| ProviderError::Decode {
            provider: PROVIDER,
            source: e,
        })?;
        Ok(parse_completion(&body))
    }
}
