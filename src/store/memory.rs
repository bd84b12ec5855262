//! In-memory store

use chrono::{DateTime, Utc};

use crate::corpus::{
    load_corpus, Corpus, ImportError, ImportOptions, ImportStatus, LoadedCorpus, RecordKey,
};
use crate::review::{
    apply_rating, build_task_queue, learning_stats, LearningStats, ProgressMap, QueueInputs,
    Rating, RatingOutcome, RetiredSet, ReviewError, Settings, TaskQueue,
};

/// Independently persisted pieces of state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blob {
    Corpus,
    Retired,
    Progress,
    Settings,
}

impl Blob {
    pub const ALL: [Blob; 4] = [Blob::Corpus, Blob::Retired, Blob::Progress, Blob::Settings];
}

/// Blobs changed since the last flush
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyBlobs {
    pub corpus: bool,
    pub retired: bool,
    pub progress: bool,
    pub settings: bool,
}

impl DirtyBlobs {
    pub fn all() -> Self {
        Self {
            corpus: true,
            retired: true,
            progress: true,
            settings: true,
        }
    }

    pub fn contains(&self, blob: Blob) -> bool {
        match blob {
            Blob::Corpus => self.corpus,
            Blob::Retired => self.retired,
            Blob::Progress => self.progress,
            Blob::Settings => self.settings,
        }
    }

    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Plain state as loaded from storage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub corpus: Corpus,
    pub progress: ProgressMap,
    pub retired: RetiredSet,
    pub settings: Settings,
}

/// Owned application state.
///
/// Starts empty; `from_snapshot` seeds it from storage. The corpus is only
/// ever replaced as a whole, after a complete successful import.
#[derive(Debug, Clone, Default)]
pub struct VocabStore {
    corpus: Corpus,
    progress: ProgressMap,
    retired: RetiredSet,
    settings: Settings,
    dirty: DirtyBlobs,
}

impl VocabStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            corpus: snapshot.corpus,
            progress: snapshot.progress,
            retired: snapshot.retired,
            settings: snapshot.settings,
            dirty: DirtyBlobs::default(),
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    pub fn retired(&self) -> &RetiredSet {
        &self.retired
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Whether a corpus has been imported
    pub fn is_loaded(&self) -> bool {
        !self.corpus.is_empty()
    }

    pub fn dirty(&self) -> DirtyBlobs {
        self.dirty
    }

    /// Clear dirty flags for blobs that were written
    pub fn mark_clean(&mut self, written: DirtyBlobs) {
        self.dirty.corpus &= !written.corpus;
        self.dirty.retired &= !written.retired;
        self.dirty.progress &= !written.progress;
        self.dirty.settings &= !written.settings;
    }

    // ===== Import =====

    /// Swap in a freshly loaded corpus. Progress and retirement are keyed by
    /// term, so they carry over to the new corpus.
    pub fn replace_corpus(&mut self, loaded: LoadedCorpus) {
        self.corpus = loaded.corpus;
        self.dirty.corpus = true;
    }

    /// Apply the result of a load. On failure the current corpus is kept.
    pub fn apply_import(&mut self, result: Result<LoadedCorpus, ImportError>) -> ImportStatus {
        let status = ImportStatus::from(&result);
        match result {
            Ok(loaded) => {
                log::info!("Replacing corpus with {} records", loaded.corpus.len());
                self.replace_corpus(loaded);
            }
            Err(e) => log::warn!("Import failed, keeping current corpus: {}", e),
        }
        status
    }

    /// Decode, parse and validate `bytes`, replacing the corpus on success
    pub fn import(&mut self, bytes: &[u8], options: &ImportOptions) -> ImportStatus {
        self.apply_import(load_corpus(bytes, options))
    }

    // ===== Scheduling =====

    pub fn queue_inputs(&self) -> QueueInputs<'_> {
        QueueInputs {
            corpus: &self.corpus,
            progress: &self.progress,
            retired: &self.retired,
            daily_target: self.settings.daily_target,
        }
    }

    pub fn task_queue(&self, now: DateTime<Utc>) -> TaskQueue {
        build_task_queue(&self.queue_inputs(), now)
    }

    /// Rate a record. Keys absent from the corpus are ignored.
    pub fn rate(
        &mut self,
        key: RecordKey,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Option<RatingOutcome> {
        if !self.corpus.contains_key(key) {
            log::warn!("Ignoring {} rating for unknown record {}", rating, key);
            return None;
        }

        let outcome = apply_rating(&mut self.progress, &mut self.retired, key, rating, now);
        match outcome {
            RatingOutcome::Retired { .. } => self.dirty.retired = true,
            RatingOutcome::Staged { .. } => self.dirty.progress = true,
        }
        Some(outcome)
    }

    /// Flip retirement from the review list, leaving review state untouched.
    /// Returns the new membership, or None for unknown keys.
    pub fn toggle_retired(&mut self, key: RecordKey) -> Option<bool> {
        if !self.corpus.contains_key(key) {
            log::warn!("Ignoring retirement toggle for unknown record {}", key);
            return None;
        }

        self.dirty.retired = true;
        Some(self.retired.toggle(key))
    }

    pub fn set_daily_target(&mut self, daily_target: u32) -> Result<(), ReviewError> {
        self.settings = Settings::with_daily_target(daily_target)?;
        self.dirty.settings = true;
        Ok(())
    }

    pub fn stats(&self, now: DateTime<Utc>) -> LearningStats {
        learning_stats(&self.queue_inputs(), now)
    }

    /// Drop all state; every blob becomes dirty so the next flush clears storage too
    pub fn reset(&mut self) {
        *self = Self {
            dirty: DirtyBlobs::all(),
            ..Self::default()
        };
    }
}
