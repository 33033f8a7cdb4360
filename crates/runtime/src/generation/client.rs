//! Chat-completions client for the text generator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::GenerationError;
use crate::config::GenerationConfig;

/// Anything that turns a system + user message into free text.
///
/// `Ok(None)` means the generator answered but produced no content.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<Option<String>, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible `POST {base_url}/chat/completions` client.
pub struct OpenAiClient {
    /// Bearer credential
    api_key: String,

    /// Base URL without the trailing path, e.g. `https://api.openai.com/v1`
    base_url: String,

    model: String,
    temperature: f32,
    max_tokens: u32,

    /// HTTP client
    http_client: reqwest::Client,
}

impl OpenAiClient {
    /// Build a client from configuration; fails without a credential.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GenerationError::MissingApiKey)?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            http_client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<Option<String>, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            "Requesting completion from {} (model={}, max_tokens={})",
            self.endpoint(),
            self.model,
            self.max_tokens
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let response_text = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            GenerationError::MalformedResponse(format!("{}. Raw response: {}", e, response_text))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|text| !text.is_empty());

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_key_is_rejected() {
        let config = GenerationConfig::default();
        assert!(matches!(
            OpenAiClient::from_config(&config),
            Err(GenerationError::MissingApiKey)
        ));
        let config = GenerationConfig::default().with_api_key("  ");
        assert!(OpenAiClient::from_config(&config).is_err());
    }

    #[test]
    fn endpoint_joins_base_url() {
        let config = GenerationConfig::default()
            .with_api_key("sk-test")
            .with_base_url("http://localhost:9000/v1/");
        let client = OpenAiClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/chat/completions");
    }
}
