//! Outbound text generation: request building, the HTTP client, and the
//! endpoint handler.

mod client;
mod error;
mod handler;
mod request;

pub use client::{OpenAiClient, TextGenerator};
pub use error::GenerationError;
pub use handler::{EMPTY_COMPLETION, GenerationHandler, HandlerResponse};
pub use request::{GenerationRequest, SYSTEM_PROMPT, ShadowLine};
