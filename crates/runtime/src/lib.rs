//! Runtime services around the Shadow Fruit rules.
//!
//! `shadow-core` is pure; this crate adds everything with side effects:
//! - [`repository`] persists the single JSON document
//! - [`document`] merges a saved document over the defaults
//! - [`generation`] talks to the external text generator
//! - [`session`] ties a repository to the controller so every mutation is saved
//! - [`config`] reads runtime settings from the environment
pub mod config;
pub mod document;
pub mod error;
pub mod generation;
pub mod repository;
pub mod session;

pub use config::{DEFAULT_STORAGE_KEY, GenerationConfig, RuntimeConfig};
pub use document::{load_with_defaults, merge_over_defaults};
pub use error::{Result, RuntimeError};
pub use generation::{
    EMPTY_COMPLETION, GenerationError, GenerationHandler, GenerationRequest, HandlerResponse,
    OpenAiClient, SYSTEM_PROMPT, ShadowLine, TextGenerator,
};
pub use repository::{
    DocumentRepository, FileDocumentRepository, InMemoryDocumentRepo, RepositoryError,
};
pub use session::Session;
