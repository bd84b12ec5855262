//! Spaced repetition for Vocabgram
//!
//! This module provides:
//! - Review state tracking (stage, last review, retirement)
//! - The fixed-step interval table and rating transitions
//! - Daily task queue computation
//! - Study session view state and learning statistics

pub mod algorithm;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod stats;

pub use algorithm::{
    apply_rating, format_interval, interval_for_stage, is_due, RatingOutcome, INTERVALS, MAX_STAGE,
};
pub use models::*;
pub use scheduler::{build_task_queue, QueueInputs, Task, TaskKind, TaskQueue};
pub use session::{SessionView, StudySession};
pub use stats::{learning_stats, LearningStats};
