//! Request handler for the generation endpoint.
//!
//! Mirrors a small HTTP function: method and JSON body in, status and JSON
//! body out. Transport is left to the caller.

use std::sync::Arc;

use serde_json::{Value, json};

use super::client::{OpenAiClient, TextGenerator};
use super::error::GenerationError;
use super::request::{GenerationRequest, SYSTEM_PROMPT};
use crate::config::GenerationConfig;

/// Text returned when the generator answers without content.
pub const EMPTY_COMPLETION: &str = "No content returned from the AI model.";

/// Status code and JSON body produced by [`GenerationHandler::handle`].
#[derive(Clone, Debug, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Generated text of a successful response.
    pub fn text(&self) -> Option<&str> {
        self.body.get("text").and_then(Value::as_str)
    }
}

impl From<GenerationError> for HandlerResponse {
    fn from(err: GenerationError) -> Self {
        Self {
            status: err.status(),
            body: err.body(),
        }
    }
}

pub struct GenerationHandler {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl GenerationHandler {
    /// Handler backed by [`OpenAiClient`]; without a credential every request
    /// is answered with a configuration error.
    pub fn from_config(config: &GenerationConfig) -> Self {
        match OpenAiClient::from_config(config) {
            Ok(client) => Self::with_generator(client),
            Err(_) => Self::unconfigured(),
        }
    }

    pub fn with_generator(generator: impl TextGenerator + 'static) -> Self {
        Self {
            generator: Some(Arc::new(generator)),
        }
    }

    pub fn unconfigured() -> Self {
        Self { generator: None }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Generate text for `request`.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(GenerationError::MissingApiKey)?;

        let text = generator.complete(SYSTEM_PROMPT, &request.prompt()).await?;
        Ok(text.unwrap_or_else(|| EMPTY_COMPLETION.to_string()))
    }

    /// Answer one request. Only `POST` is accepted; a missing body reads as
    /// an empty request.
    pub async fn handle(&self, method: &str, body: Option<Value>) -> HandlerResponse {
        match self.try_handle(method, body).await {
            Ok(text) => HandlerResponse {
                status: 200,
                body: json!({ "text": text }),
            },
            Err(err) => {
                if !matches!(err, GenerationError::MethodNotAllowed(_)) {
                    tracing::error!("Generation failed: {}", err);
                }
                err.into()
            }
        }
    }

    async fn try_handle(&self, method: &str, body: Option<Value>) -> Result<String, GenerationError> {
        if !method.eq_ignore_ascii_case("POST") {
            return Err(GenerationError::MethodNotAllowed(method.to_string()));
        }
        if !self.is_configured() {
            return Err(GenerationError::MissingApiKey);
        }

        let request = match body {
            None | Some(Value::Null) => GenerationRequest::default(),
            Some(body) => serde_json::from_value(body)
                .map_err(|e| GenerationError::InvalidRequest(e.to_string()))?,
        };

        self.generate(&request).await
    }
}
