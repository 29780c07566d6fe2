//! Error types for store persistence.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while persisting the dynamic store.
///
/// Load failures are deliberately not represented here: an unreadable or
/// corrupt store file is recovered to an empty store with explicit
/// provenance (see [`super::LoadSource`]), while a write failure is fatal
/// for the ingestion call and must propagate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data directory could not be created.
    #[error("failed to create data directory '{}': {source}", path.display())]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The record list could not be serialized to JSON.
    #[error("failed to serialize store records: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The temporary store file could not be written.
    #[error("failed to write store file '{}': {source}", path.display())]
    Write {
        /// The temp file path that could not be written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The written snapshot could not be renamed over the store file.
    #[error("failed to replace store file '{}': {source}", path.display())]
    Commit {
        /// The final store file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}
