//! Review-list lookup over the corpus

use serde::Serialize;

use super::models::{Corpus, VocabularyRecord};
use crate::review::{ProgressMap, RetiredSet};

/// Default cap on the number of rows shown in the review list
pub const DEFAULT_LIST_LIMIT: usize = 150;

/// A row of the review list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry<'a> {
    pub record: &'a VocabularyRecord,
    pub retired: bool,
    /// Current stage, 0 when never reviewed
    pub stage: usize,
}

/// Case-insensitive substring search over terms, in corpus order.
/// An empty query lists the first `limit` records.
pub fn search_records<'a>(
    corpus: &'a Corpus,
    progress: &ProgressMap,
    retired: &RetiredSet,
    query: &str,
    limit: usize,
) -> Vec<ListEntry<'a>> {
    let needle = query.trim().to_lowercase();

    corpus
        .iter()
        .filter(|r| needle.is_empty() || r.term.to_lowercase().contains(&needle))
        .take(limit)
        .map(|record| ListEntry {
            record,
            retired: retired.contains(record.key),
            stage: progress.get(&record.key).map_or(0, |s| s.stage),
        })
        .collect()
}
