//! Study session view state
//!
//! A session walks a snapshot of the task queue taken when it starts. Each
//! rating is applied to the store, then the session either advances to the
//! next card with the answer hidden or, after the last card, completes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::algorithm::RatingOutcome;
use super::models::Rating;
use super::scheduler::{Task, TaskQueue};
use crate::store::VocabStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum SessionView {
    Studying {
        position: usize,
        answer_visible: bool,
    },
    Complete,
}

#[derive(Debug, Clone)]
pub struct StudySession {
    queue: TaskQueue,
    position: usize,
    answer_visible: bool,
    complete: bool,
}

impl StudySession {
    pub fn new(queue: TaskQueue) -> Self {
        let complete = queue.is_empty();
        Self {
            queue,
            position: 0,
            answer_visible: false,
            complete,
        }
    }

    /// Start a session over the store's current queue
    pub fn start(store: &VocabStore, now: DateTime<Utc>) -> Self {
        Self::new(store.task_queue(now))
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&Task> {
        if self.complete {
            None
        } else {
            self.queue.get(self.position)
        }
    }

    pub fn view(&self) -> SessionView {
        if self.complete {
            SessionView::Complete
        } else {
            SessionView::Studying {
                position: self.position,
                answer_visible: self.answer_visible,
            }
        }
    }

    pub fn toggle_answer(&mut self) {
        self.answer_visible = !self.answer_visible;
    }

    /// Rate the current card and move on.
    /// Returns None if the session is already complete.
    pub fn rate(
        &mut self,
        store: &mut VocabStore,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Option<RatingOutcome> {
        let task = *self.current()?;
        let outcome = store.rate(task.key, rating, now);

        if self.position + 1 >= self.queue.len() {
            self.complete = true;
        } else {
            self.position += 1;
            self.answer_visible = false;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::ImportOptions;
    use chrono::TimeZone;

    fn store() -> VocabStore {
        let mut store = VocabStore::new();
        store.import(
            b"word,phonetic,definition\none,,1\ntwo,,2\nthree,,3\n",
            &ImportOptions::default(),
        );
        store
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 6, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_queue_is_complete() {
        let session = StudySession::new(TaskQueue::default());
        assert_eq!(session.view(), SessionView::Complete);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_rating_advances_and_hides_answer() {
        let mut store = store();
        let mut session = StudySession::start(&store, now());

        session.toggle_answer();
        assert_eq!(
            session.view(),
            SessionView::Studying {
                position: 0,
                answer_visible: true
            }
        );

        session.rate(&mut store, Rating::Known, now());
        assert_eq!(
            session.view(),
            SessionView::Studying {
                position: 1,
                answer_visible: false
            }
        );
        assert_eq!(session.current().map(|t| t.id), Some(1));
    }

    #[test]
    fn test_last_rating_completes() {
        let mut store = store();
        let mut session = StudySession::start(&store, now());

        session.rate(&mut store, Rating::Known, now());
        session.rate(&mut store, Rating::Forgot, now());
        session.rate(&mut store, Rating::Mastered, now());

        assert_eq!(session.view(), SessionView::Complete);
        assert!(session.rate(&mut store, Rating::Known, now()).is_none());
        assert_eq!(store.progress().len(), 2);
        assert_eq!(store.retired().len(), 1);
    }

    #[test]
    fn test_session_uses_snapshot_of_queue() {
        let mut store = store();
        let mut session = StudySession::start(&store, now());
        let first = session.current().map(|t| t.key);

        session.rate(&mut store, Rating::Known, now());

        // the rated card is no longer due, but the session keeps its order
        assert!(store.task_queue(now()).iter().all(|t| Some(t.key) != first));
        assert_eq!(session.queue().len(), 3);
    }
}
