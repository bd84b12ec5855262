//! Vocabgram state store
//!
//! `VocabStore` owns the in-memory corpus, review progress, retired set and
//! settings; `FileStorage` persists them as four independent JSON blobs.
//! Mutations only mark blobs dirty, writing happens on an explicit flush.

mod file_storage;
mod memory;

pub use file_storage::{FileStorage, StorageError};
pub use memory::{Blob, DirtyBlobs, StoreSnapshot, VocabStore};
