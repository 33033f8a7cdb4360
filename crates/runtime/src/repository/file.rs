//! File-based DocumentRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use shadow_core::SystemState;

use super::{DocumentRepository, RepositoryError, Result};

/// Stores the document as `<base_dir>/<storage_key>.json`.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous document intact.
pub struct FileDocumentRepository {
    path: PathBuf,
}

impl FileDocumentRepository {
    /// Create the repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>, storage_key: &str) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            path: base_dir.join(format!("{}.json", storage_key)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentRepository for FileDocumentRepository {
    fn load(&self) -> Result<Option<serde_json::Value>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path).map_err(RepositoryError::Io)?;
        if raw.trim().is_empty() {
            return Err(RepositoryError::CorruptedData(format!(
                "{} is empty",
                self.path.display()
            )));
        }
        let document: serde_json::Value = serde_json::from_str(&raw)?;

        tracing::debug!("Loaded document from {}", self.path.display());

        Ok(Some(document))
    }

    fn save(&self, state: &SystemState) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(state)?;

        fs::write(&temp_path, json).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved document to {}", self.path.display());

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted document {}", self.path.display());
        }
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}
