//! Unified error type surfaced by the runtime.
//!
//! Wraps repository, generation and ledger failures so the client can bubble
//! them up with one `?`.

use shadow_core::LedgerError;
use thiserror::Error;

pub use crate::generation::GenerationError;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
