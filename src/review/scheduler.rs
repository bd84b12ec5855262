//! Daily task queue computation
//!
//! The queue is a pure function of the corpus, review progress, the retired
//! set, the daily target and `now`:
//! 1. due records: reviewed, not retired, interval elapsed (never capped)
//! 2. new records: never reviewed, not retired, in corpus order, capped at
//!    `daily_target - due`
//! 3. due ++ new, stably sorted by ascending stage (new records count as 0)

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::algorithm::is_due;
use super::models::{ProgressMap, RetiredSet};
use crate::corpus::{Corpus, RecordKey};

/// Why a record is in today's queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    Due,
    New,
}

/// One entry of the task queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Positional id of the record in the corpus
    pub id: usize,
    pub key: RecordKey,
    pub kind: TaskKind,
    pub stage: usize,
}

/// Everything the queue depends on besides the clock
#[derive(Debug, Clone, Copy)]
pub struct QueueInputs<'a> {
    pub corpus: &'a Corpus,
    pub progress: &'a ProgressMap,
    pub retired: &'a RetiredSet,
    pub daily_target: u32,
}

/// Today's ordered tasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQueue {
    tasks: Vec<Task>,
    due_count: usize,
    new_count: usize,
}

impl TaskQueue {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn due_count(&self) -> usize {
        self.due_count
    }

    pub fn new_count(&self) -> usize {
        self.new_count
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }
}

/// Compute today's task queue.
///
/// A key appears at most once; when several records share a term, the first
/// one in corpus order represents it.
pub fn build_task_queue(inputs: &QueueInputs<'_>, now: DateTime<Utc>) -> TaskQueue {
    let QueueInputs {
        corpus,
        progress,
        retired,
        daily_target,
    } = *inputs;

    let mut seen: HashSet<RecordKey> = HashSet::new();
    let mut tasks = Vec::new();

    for record in corpus {
        if retired.contains(record.key) {
            continue;
        }
        if let Some(state) = progress.get(&record.key) {
            if is_due(state, now) && seen.insert(record.key) {
                tasks.push(Task {
                    id: record.id,
                    key: record.key,
                    kind: TaskKind::Due,
                    stage: state.stage,
                });
            }
        }
    }

    let due_count = tasks.len();
    let new_limit = (daily_target as usize).saturating_sub(due_count);
    let mut new_count = 0;

    for record in corpus {
        if new_count >= new_limit {
            break;
        }
        if retired.contains(record.key) || progress.contains_key(&record.key) {
            continue;
        }
        if seen.insert(record.key) {
            tasks.push(Task {
                id: record.id,
                key: record.key,
                kind: TaskKind::New,
                stage: 0,
            });
            new_count += 1;
        }
    }

    tasks.sort_by_key(|t| t.stage);

    TaskQueue {
        tasks,
        due_count,
        new_count,
    }
}
