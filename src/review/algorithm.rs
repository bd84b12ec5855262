//! Fixed-step spaced repetition
//!
//! Each record with review history sits at a stage; the stage indexes a
//! fixed interval table (in days). A record is due once the time since its
//! last review reaches the interval of its stage.
//!
//! Ratings:
//! - mastered: the record is retired and never scheduled again
//! - known: advance one stage (capped at the last stage)
//! - forgot: back to stage 1. Never stage 0, whose zero interval would make
//!   the record due again immediately.

use chrono::{DateTime, Utc};

use super::models::{ProgressMap, Rating, RetiredSet, ReviewState};
use crate::corpus::RecordKey;

/// Review intervals in days, indexed by stage
pub const INTERVALS: [u32; 7] = [0, 1, 2, 4, 7, 15, 30];

/// Highest reachable stage
pub const MAX_STAGE: usize = INTERVALS.len() - 1;

/// Stage a forgotten record restarts at
const FORGOT_STAGE: usize = 1;

const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// What a rating did to the review state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingOutcome {
    /// Added to the retired set; `newly` is false if it was already retired
    Retired { newly: bool },
    /// Review state written
    Staged {
        previous: Option<usize>,
        state: ReviewState,
    },
}

/// Interval in days for a stage; stages past the table use the last entry
pub fn interval_for_stage(stage: usize) -> u32 {
    INTERVALS[stage.min(MAX_STAGE)]
}

/// Whether a reviewed record is due at `now`
pub fn is_due(state: &ReviewState, now: DateTime<Utc>) -> bool {
    let elapsed_days =
        (now - state.last_reviewed_at).num_milliseconds() as f64 / MS_PER_DAY;
    elapsed_days >= interval_for_stage(state.stage) as f64
}

/// Compute the review state produced by a known/forgot rating.
/// Returns None for `Mastered`, which does not touch review state.
pub fn next_state(
    current: Option<&ReviewState>,
    rating: Rating,
    now: DateTime<Utc>,
) -> Option<ReviewState> {
    match rating {
        Rating::Mastered => None,
        Rating::Known => {
            let stage = current.map_or(0, |s| s.stage.min(MAX_STAGE));
            Some(ReviewState::new((stage + 1).min(MAX_STAGE), now))
        }
        Rating::Forgot => Some(ReviewState::new(FORGOT_STAGE, now)),
    }
}

/// Apply a rating to the review state of one record
pub fn apply_rating(
    progress: &mut ProgressMap,
    retired: &mut RetiredSet,
    key: RecordKey,
    rating: Rating,
    now: DateTime<Utc>,
) -> RatingOutcome {
    let previous = progress.get(&key).copied();
    let state = match next_state(previous.as_ref(), rating, now) {
        Some(state) => state,
        None => {
            return RatingOutcome::Retired {
                newly: retired.insert(key),
            }
        }
    };
    progress.insert(key, state);

    RatingOutcome::Staged {
        previous: previous.map(|s| s.stage),
        state,
    }
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: u32) -> String {
    if days == 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap()
    }

    fn key() -> RecordKey {
        RecordKey::for_term("ephemeral")
    }

    #[test]
    fn test_interval_table() {
        assert_eq!(INTERVALS.len(), 7);
        assert_eq!(MAX_STAGE, 6);
        assert_eq!(interval_for_stage(2), 2);
        assert_eq!(interval_for_stage(6), 30);
        assert_eq!(interval_for_stage(42), 30);
    }

    #[test]
    fn test_due_after_interval_elapsed() {
        // stage 2 reviewed three days ago: due
        let state = ReviewState::new(2, now() - Duration::days(3));
        assert!(is_due(&state, now()));

        // exactly on the boundary counts as due
        let state = ReviewState::new(2, now() - Duration::days(2));
        assert!(is_due(&state, now()));

        let state = ReviewState::new(2, now() - Duration::hours(47));
        assert!(!is_due(&state, now()));
    }

    #[test]
    fn test_stage_one_due_after_a_day() {
        let state = ReviewState::new(1, now() - Duration::hours(23));
        assert!(!is_due(&state, now()));
        let state = ReviewState::new(1, now() - Duration::hours(24));
        assert!(is_due(&state, now()));
    }

    #[test]
    fn test_known_from_new_goes_to_stage_one() {
        let state = next_state(None, Rating::Known, now()).unwrap();
        assert_eq!(state, ReviewState::new(1, now()));
    }

    #[test]
    fn test_known_is_monotonic_and_capped() {
        let mut progress = ProgressMap::new();
        let mut retired = RetiredSet::default();
        let mut last = 0;

        for _ in 0..20 {
            apply_rating(&mut progress, &mut retired, key(), Rating::Known, now());
            let stage = progress[&key()].stage;
            assert!(stage >= last);
            assert!(stage <= MAX_STAGE);
            last = stage;
        }
        assert_eq!(last, MAX_STAGE);
    }

    #[test]
    fn test_forgot_without_history_goes_to_stage_one() {
        let mut progress = ProgressMap::new();
        let mut retired = RetiredSet::default();

        let outcome = apply_rating(&mut progress, &mut retired, key(), Rating::Forgot, now());

        assert_eq!(
            outcome,
            RatingOutcome::Staged {
                previous: None,
                state: ReviewState::new(1, now()),
            }
        );
        assert_eq!(progress[&key()], ReviewState::new(1, now()));
    }

    #[test]
    fn test_known_on_out_of_range_stage_stays_at_max() {
        let mut progress = ProgressMap::new();
        let mut retired = RetiredSet::default();
        progress.insert(key(), ReviewState::new(usize::MAX, now() - Duration::days(40)));

        apply_rating(&mut progress, &mut retired, key(), Rating::Known, now());
        assert_eq!(progress[&key()].stage, MAX_STAGE);
    }

    #[test]
    fn test_forgot_resets_high_stage() {
        let mut progress = ProgressMap::new();
        let mut retired = RetiredSet::default();
        progress.insert(key(), ReviewState::new(5, now() - Duration::days(20)));

        apply_rating(&mut progress, &mut retired, key(), Rating::Forgot, now());
        assert_eq!(progress[&key()].stage, 1);
        assert_eq!(progress[&key()].last_reviewed_at, now());
    }

    #[test]
    fn test_mastered_leaves_review_state_untouched() {
        let mut progress = ProgressMap::new();
        let mut retired = RetiredSet::default();
        let before = ReviewState::new(3, now() - Duration::days(1));
        progress.insert(key(), before);

        let outcome = apply_rating(&mut progress, &mut retired, key(), Rating::Mastered, now());
        assert_eq!(outcome, RatingOutcome::Retired { newly: true });
        assert!(retired.contains(key()));
        assert_eq!(progress[&key()], before);

        let outcome = apply_rating(&mut progress, &mut retired, key(), Rating::Mastered, now());
        assert_eq!(outcome, RatingOutcome::Retired { newly: false });
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(4), "4d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(15), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(90), "3mo");
        assert_eq!(format_interval(730), "2y");
    }
}
