//! Data-driven calculator content.
//!
//! Loaders for files a table can share between sessions:
//! - extra buff definitions (RON), merged into a document's catalog
//! - calculator configuration (TOML)
//!
//! The built-in catalog itself lives in `shadow-core`; files here only add to
//! or tune it.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{BuffSpec, CatalogFile, CatalogLoader, ConfigLoader, EffectSpec, LoadResult};
