use std::path::Path;

use anyhow::{bail, Context, Result};

use vocabgram_lib::speech::{speaker_from_config, Speaker};
use vocabgram_lib::{AppConfig, FileStorage, VocabStore, VocabularyRecord};

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub storage: FileStorage,
    pub store: VocabStore,
}

impl App {
    /// Load config and persisted state. `data_dir` overrides the config file.
    pub fn new(data_dir: Option<&Path>) -> Result<Self> {
        let config = match AppConfig::default_path() {
            Some(path) => AppConfig::load(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => AppConfig::default(),
        };

        let data_dir = match data_dir.map(Path::to_path_buf).or_else(|| config.data_dir.clone()) {
            Some(dir) => dir,
            None => FileStorage::default_data_dir().context("Failed to get data directory")?,
        };

        let storage = FileStorage::new(data_dir);
        let snapshot = storage.load().context("Failed to load saved state")?;
        log::debug!(
            "Loaded {} words from {:?}",
            snapshot.corpus.len(),
            storage.base_path()
        );

        Ok(Self {
            config,
            storage,
            store: VocabStore::from_snapshot(snapshot),
        })
    }

    /// Fail with a hint if nothing was imported yet
    pub fn require_corpus(&self) -> Result<()> {
        if !self.store.is_loaded() {
            bail!("No vocabulary imported yet. Run `vocabgram-cli import <file>` first.");
        }
        Ok(())
    }

    /// Find a word by term (case-insensitive)
    pub fn find_record(&self, term: &str) -> Result<&VocabularyRecord> {
        self.require_corpus()?;
        match self.store.corpus().find_by_term(term) {
            Some(record) => Ok(record),
            None => bail!("No word '{}' in the vocabulary", term),
        }
    }

    /// Write pending changes
    pub fn save(&mut self) -> Result<()> {
        self.storage
            .flush(&mut self.store)
            .context("Failed to save state")?;
        Ok(())
    }

    /// Write pending changes, logging instead of failing
    pub fn save_quietly(&mut self) {
        if let Err(e) = self.storage.flush(&mut self.store) {
            log::warn!("Failed to save state: {}", e);
        }
    }

    pub fn speaker(&self) -> Box<dyn Speaker> {
        speaker_from_config(&self.config.speech)
    }
}
