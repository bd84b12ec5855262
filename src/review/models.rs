//! Data models for review state

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::corpus::RecordKey;
use super::algorithm::MAX_STAGE;

/// Spaced repetition state for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// Index into the interval table
    #[serde(deserialize_with = "deserialize_stage")]
    pub stage: usize,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_reviewed_at: DateTime<Utc>,
}

impl ReviewState {
    pub fn new(stage: usize, last_reviewed_at: DateTime<Utc>) -> Self {
        Self {
            stage,
            last_reviewed_at,
        }
    }
}

/// Stages past the interval table are clamped to the last stage
fn deserialize_stage<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let stage = u64::deserialize(deserializer)?;
    if stage > MAX_STAGE as u64 {
        warn!("Stored stage {} out of range, clamping to {}", stage, MAX_STAGE);
        return Ok(MAX_STAGE);
    }
    Ok(stage as usize)
}

/// Review state per record. Absence means "never reviewed".
pub type ProgressMap = BTreeMap<RecordKey, ReviewState>;

/// Records permanently marked as mastered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetiredSet(BTreeSet<RecordKey>);

impl RetiredSet {
    pub fn contains(&self, key: RecordKey) -> bool {
        self.0.contains(&key)
    }

    /// Returns true if the key was newly retired
    pub fn insert(&mut self, key: RecordKey) -> bool {
        self.0.insert(key)
    }

    /// Flip membership, returning whether the key is retired afterwards
    pub fn toggle(&mut self, key: RecordKey) -> bool {
        if self.0.remove(&key) {
            false
        } else {
            self.0.insert(key);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<RecordKey> for RetiredSet {
    fn from_iter<I: IntoIterator<Item = RecordKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// How the learner rated a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rating {
    /// Never show again
    Mastered,
    /// Remembered; advance one stage
    Known,
    /// Forgotten; back to stage 1
    Forgot,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mastered => "mastered",
            Self::Known => "known",
            Self::Forgot => "forgot",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Unknown rating: {0} (expected mastered, known or forgot)")]
    UnknownRating(String),

    #[error("Daily target must be at least 1")]
    InvalidDailyTarget,
}

impl FromStr for Rating {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mastered" | "m" => Ok(Self::Mastered),
            "known" | "k" => Ok(Self::Known),
            "forgot" | "f" => Ok(Self::Forgot),
            other => Err(ReviewError::UnknownRating(other.to_string())),
        }
    }
}

/// User settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Maximum number of new words entering one day's queue
    #[serde(
        default = "default_daily_target",
        deserialize_with = "deserialize_daily_target"
    )]
    pub daily_target: u32,
}

fn default_daily_target() -> u32 {
    20
}

/// A stored target of zero falls back to the default
fn deserialize_daily_target<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let target = u32::deserialize(deserializer)?;
    if target == 0 {
        warn!(
            "Stored daily target is 0, using default {}",
            default_daily_target()
        );
        return Ok(default_daily_target());
    }
    Ok(target)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_target: default_daily_target(),
        }
    }
}

impl Settings {
    pub fn with_daily_target(daily_target: u32) -> Result<Self, ReviewError> {
        if daily_target == 0 {
            return Err(ReviewError::InvalidDailyTarget);
        }
        Ok(Self { daily_target })
    }
}
