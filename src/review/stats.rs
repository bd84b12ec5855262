//! Learning statistics

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::scheduler::{build_task_queue, QueueInputs};

/// Progress overview for the whole corpus
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    pub total_words: usize,
    /// Retired words
    pub mastered: usize,
    /// Words with review history that are not retired
    pub reviewing: usize,
    /// Words never reviewed nor retired
    pub untouched: usize,
    /// Size of today's queue
    pub queue_size: usize,
    pub due_today: usize,
}

impl LearningStats {
    /// Share of the corpus that is mastered, in percent
    pub fn mastered_percent(&self) -> f64 {
        if self.total_words == 0 {
            return 0.0;
        }
        self.mastered as f64 * 100.0 / self.total_words as f64
    }
}

pub fn learning_stats(inputs: &QueueInputs<'_>, now: DateTime<Utc>) -> LearningStats {
    let mut stats = LearningStats {
        total_words: inputs.corpus.len(),
        ..Default::default()
    };

    for record in inputs.corpus {
        if inputs.retired.contains(record.key) {
            stats.mastered += 1;
        } else if inputs.progress.contains_key(&record.key) {
            stats.reviewing += 1;
        } else {
            stats.untouched += 1;
        }
    }

    let queue = build_task_queue(inputs, now);
    stats.queue_size = queue.len();
    stats.due_today = queue.due_count();

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Corpus, VocabularyRecord};
    use crate::review::models::{ProgressMap, RetiredSet, ReviewState};
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_counts_partition_corpus() {
        let now = Utc.with_ymd_and_hms(2026, 7, 4, 10, 0, 0).unwrap();
        let corpus = Corpus::new(
            (0..8)
                .map(|i| VocabularyRecord::new(i, format!("w{}", i)))
                .collect(),
        );
        let key = |id: usize| corpus.records()[id].key;

        let mut progress = ProgressMap::new();
        progress.insert(key(0), ReviewState::new(1, now - Duration::days(2)));
        progress.insert(key(1), ReviewState::new(5, now));
        // retired with history counts as mastered only
        progress.insert(key(2), ReviewState::new(2, now));
        let retired: RetiredSet = [key(2), key(3)].into_iter().collect();

        let stats = learning_stats(
            &QueueInputs {
                corpus: &corpus,
                progress: &progress,
                retired: &retired,
                daily_target: 3,
            },
            now,
        );

        assert_eq!(stats.total_words, 8);
        assert_eq!(stats.mastered, 2);
        assert_eq!(stats.reviewing, 2);
        assert_eq!(stats.untouched, 4);
        assert_eq!(stats.due_today, 1);
        assert_eq!(stats.queue_size, 3);
        assert!((stats.mastered_percent() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_corpus_percent() {
        assert_eq!(LearningStats::default().mastered_percent(), 0.0);
    }
}
