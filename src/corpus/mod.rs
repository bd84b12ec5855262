//! Vocabulary corpus for Vocabgram
//!
//! This module provides:
//! - A quoting-aware record parser for delimited text
//! - The corpus loader (encoding detection, row validation, record shaping)
//! - Review-list search over the loaded corpus

pub mod import;
pub mod models;
pub mod parser;
pub mod search;

pub use import::{
    load_corpus, load_corpus_in_background, ImportError, ImportOptions,
    ImportStatus, LoadedCorpus, RowRejection,
};
pub use models::*;
pub use parser::parse_records;
pub use search::{search_records, ListEntry};
