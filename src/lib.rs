pub mod config;
pub mod corpus;
pub mod review;
pub mod speech;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use corpus::{Corpus, ImportStatus, RecordKey, VocabularyRecord};
pub use review::{Rating, StudySession, TaskQueue};
pub use store::{FileStorage, StorageError, VocabStore};
