//! Persisted dynamic store of accepted scraped questions.
//!
//! One data directory holds one logical store: a single JSON array of
//! classified questions at a fixed file name. The store is append-only —
//! records are never edited or removed — and every persist rewrites the
//! full snapshot. A single logical writer per data directory is assumed;
//! the temp-file-then-rename commit protects against torn writes, not
//! against concurrent writers.

mod error;
mod record;

pub use error::StoreError;
pub use record::{ClassifiedQuestion, Difficulty, RawQuestion};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

/// Fixed store file name within a data directory.
pub const STORE_FILE_NAME: &str = "scraped_questions.json";

/// How the in-memory store was obtained from disk.
///
/// Distinguishes the expected "no file yet" case from the anomalous
/// "file present but unreadable" case, so callers can surface potential
/// data loss instead of silently treating it as an empty store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// No store file existed; starting empty is the expected outcome.
    Absent,
    /// The store file was read and parsed.
    File,
    /// The store file existed but could not be read or parsed; the store
    /// starts empty and prior data may have been lost.
    Recovered,
}

/// In-memory view of one data directory's persisted question store.
#[derive(Debug, Clone)]
pub struct DynamicStore {
    records: Vec<ClassifiedQuestion>,
    source: LoadSource,
}

impl DynamicStore {
    /// Creates an empty store not backed by any file read.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            source: LoadSource::Absent,
        }
    }

    /// Returns the store file path for a data directory.
    #[must_use]
    pub fn store_path(data_dir: &Path) -> PathBuf {
        data_dir.join(STORE_FILE_NAME)
    }

    /// Loads the store for a data directory.
    ///
    /// A missing file yields an empty store with [`LoadSource::Absent`].
    /// A file that exists but cannot be read or parsed yields an empty
    /// store with [`LoadSource::Recovered`] and a warning — the caller
    /// decides whether that is acceptable.
    #[instrument(skip(data_dir), fields(path = %Self::store_path(data_dir).display()))]
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let path = Self::store_path(data_dir);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("No store file yet, starting empty");
                return Self::empty();
            }
            Err(error) => {
                warn!(%error, "Store file exists but could not be read; starting empty");
                return Self {
                    records: Vec::new(),
                    source: LoadSource::Recovered,
                };
            }
        };

        match serde_json::from_str::<Vec<ClassifiedQuestion>>(&raw) {
            Ok(records) => {
                debug!(records = records.len(), "Loaded store file");
                Self {
                    records,
                    source: LoadSource::File,
                }
            }
            Err(error) => {
                warn!(%error, "Store file is corrupt; starting empty");
                Self {
                    records: Vec::new(),
                    source: LoadSource::Recovered,
                }
            }
        }
    }

    /// How this store was obtained.
    #[must_use]
    pub fn source(&self) -> LoadSource {
        self.source
    }

    /// All records, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ClassifiedQuestion] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends an accepted record. The store only grows.
    pub fn append(&mut self, record: ClassifiedQuestion) {
        self.records.push(record);
    }

    /// Question texts of all records, for duplicate comparison.
    pub fn question_texts(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.question.text.as_str())
    }

    /// Persists the full record list as one JSON array.
    ///
    /// Creates the data directory if absent, writes the snapshot to a temp
    /// file in the same directory, then renames it over the store file so
    /// the previous snapshot survives a failed write.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the directory cannot be created or the
    /// snapshot cannot be written or committed.
    #[instrument(skip(self, data_dir), fields(path = %Self::store_path(data_dir).display(), records = self.records.len()))]
    pub fn persist(&self, data_dir: &Path) -> Result<(), StoreError> {
        fs::create_dir_all(data_dir).map_err(|source| StoreError::CreateDir {
            path: data_dir.to_path_buf(),
            source,
        })?;

        let json = serde_json::to_string_pretty(&self.records)?;

        let path = Self::store_path(data_dir);
        let temp_path = data_dir.join(format!("{STORE_FILE_NAME}.tmp"));
        fs::write(&temp_path, json).map_err(|source| StoreError::Write {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &path).map_err(|source| StoreError::Commit { path, source })?;

        debug!("Store snapshot persisted");
        Ok(())
    }
}
