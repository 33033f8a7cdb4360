//! In-memory DocumentRepository implementation for tests and local runs.

use std::sync::RwLock;

use shadow_core::SystemState;

use super::{DocumentRepository, RepositoryError, Result};

/// Keeps the document as a JSON value, exactly as the file store would.
pub struct InMemoryDocumentRepo {
    document: RwLock<Option<serde_json::Value>>,
}

impl InMemoryDocumentRepo {
    pub fn new() -> Self {
        Self {
            document: RwLock::new(None),
        }
    }

    /// Start from an already-saved raw document.
    pub fn with_document(document: serde_json::Value) -> Self {
        Self {
            document: RwLock::new(Some(document)),
        }
    }
}

impl Default for InMemoryDocumentRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRepository for InMemoryDocumentRepo {
    fn load(&self) -> Result<Option<serde_json::Value>> {
        let document = self
            .document
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(document.clone())
    }

    fn save(&self, state: &SystemState) -> Result<()> {
        let value = serde_json::to_value(state)?;
        let mut document = self
            .document
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *document = Some(value);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut document = self
            .document
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *document = None;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.document
            .read()
            .map(|document| document.is_some())
            .unwrap_or(false)
    }
}
