//! Content loaders for reading calculator data from files.

pub mod catalog;
pub mod config;

pub use catalog::{BuffSpec, CatalogFile, CatalogLoader, EffectSpec};
pub use config::ConfigLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
