//! Failures of the text-generation boundary and their HTTP rendering.

use serde_json::{Value, json};
use thiserror::Error;

/// Everything that can go wrong between a request and generated text.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    #[error("Missing OPENAI_API_KEY in environment variables.")]
    MissingApiKey,

    #[error("OpenAI API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("request to text generator failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response from text generator: {0}")]
    MalformedResponse(String),

    #[error("invalid request body: {0}")]
    InvalidRequest(String),
}

impl GenerationError {
    /// HTTP status the handler answers with.
    pub fn status(&self) -> u16 {
        match self {
            Self::MethodNotAllowed(_) => 405,
            _ => 500,
        }
    }

    /// JSON body the handler answers with.
    pub fn body(&self) -> Value {
        match self {
            Self::MethodNotAllowed(_) => json!({ "error": "Method not allowed" }),
            Self::MissingApiKey => json!({ "error": self.to_string() }),
            Self::Upstream { body, .. } => json!({ "error": "OpenAI API error", "details": body }),
            Self::Transport(_) | Self::MalformedResponse(_) | Self::InvalidRequest(_) => {
                json!({ "error": "Internal server error", "details": self.to_string() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_not_allowed_is_a_client_error() {
        let err = GenerationError::MethodNotAllowed("GET".into());
        assert_eq!(err.status(), 405);
        assert_eq!(err.body(), json!({ "error": "Method not allowed" }));
    }

    #[test]
    fn upstream_failure_carries_raw_body() {
        let err = GenerationError::Upstream {
            status: 429,
            body: "{\"error\":\"rate limited\"}".into(),
        };
        assert_eq!(err.status(), 500);
        assert_eq!(err.body()["details"], "{\"error\":\"rate limited\"}");
    }

    #[test]
    fn missing_key_message() {
        assert_eq!(
            GenerationError::MissingApiKey.body(),
            json!({ "error": "Missing OPENAI_API_KEY in environment variables." })
        );
    }
}
