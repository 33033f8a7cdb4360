//! Repository contract for the persisted calculator document.

use shadow_core::SystemState;

use super::Result;

/// Storage for the single application-state document.
///
/// `load` hands back the raw JSON so callers can merge it over defaults
/// before deserializing; `save` always rewrites the whole document.
pub trait DocumentRepository: Send + Sync {
    /// Raw saved document, or `None` when nothing has been saved.
    fn load(&self) -> Result<Option<serde_json::Value>>;

    /// Replace the stored document with `state`.
    fn save(&self, state: &SystemState) -> Result<()>;

    /// Delete the stored document. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;

    fn exists(&self) -> bool;
}
