//! JSON file persistence for the store
//!
//! Directory structure:
//! ```text
//! {data-dir}/
//! ├── corpus.json     # Array of vocabulary records
//! ├── retired.json    # Array of retired record keys
//! ├── progress.json   # Record key -> { stage, lastReviewedAt }
//! └── settings.json   # { dailyTarget }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::memory::{Blob, DirtyBlobs, StoreSnapshot, VocabStore};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage manager for the persisted blobs
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("vocabgram"))
            .ok_or(StorageError::DataDirNotFound)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Create the data directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    fn blob_path(&self, blob: Blob) -> PathBuf {
        let file_name = match blob {
            Blob::Corpus => "corpus.json",
            Blob::Retired => "retired.json",
            Blob::Progress => "progress.json",
            Blob::Settings => "settings.json",
        };
        self.base_path.join(file_name)
    }

    /// Read a blob; missing or unreadable JSON yields the default value
    fn read_blob<T: DeserializeOwned + Default>(&self, blob: Blob) -> Result<T> {
        let path = self.blob_path(blob);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(value) => Ok(value),
            Err(e) => {
                log::warn!("Ignoring corrupt {:?}: {}", path, e);
                Ok(T::default())
            }
        }
    }

    fn write_blob<T: Serialize>(&self, blob: Blob, value: &T) -> Result<()> {
        fs::write(self.blob_path(blob), serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    /// Load all persisted state
    pub fn load(&self) -> Result<StoreSnapshot> {
        Ok(StoreSnapshot {
            corpus: self.read_blob(Blob::Corpus)?,
            progress: self.read_blob(Blob::Progress)?,
            retired: self.read_blob(Blob::Retired)?,
            settings: self.read_blob(Blob::Settings)?,
        })
    }

    /// Write the store's dirty blobs and mark them clean.
    /// Returns which blobs were written.
    pub fn flush(&self, store: &mut VocabStore) -> Result<DirtyBlobs> {
        let dirty = store.dirty();
        if dirty.is_clean() {
            return Ok(dirty);
        }

        self.init()?;
        let mut written = DirtyBlobs::default();
        for blob in Blob::ALL {
            if !dirty.contains(blob) {
                continue;
            }
            match blob {
                Blob::Corpus => {
                    self.write_blob(blob, store.corpus())?;
                    written.corpus = true;
                }
                Blob::Retired => {
                    self.write_blob(blob, store.retired())?;
                    written.retired = true;
                }
                Blob::Progress => {
                    self.write_blob(blob, store.progress())?;
                    written.progress = true;
                }
                Blob::Settings => {
                    self.write_blob(blob, &store.settings())?;
                    written.settings = true;
                }
            }
            // Clear as we go so a later failure doesn't rewrite these
            store.mark_clean(written);
        }

        log::debug!("Flushed {:?} to {:?}", written, self.base_path);
        Ok(written)
    }
}
