//! Persistence for the calculator document.
//!
//! One JSON document holds the whole application state. It is read once when
//! a session opens and rewritten wholesale after every mutation.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileDocumentRepository;
pub use memory::InMemoryDocumentRepo;
pub use traits::DocumentRepository;
