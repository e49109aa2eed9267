//! Error types for free-time accounting and planning.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FreeTimeError {
    #[error("Invalid interval: start {start} is after end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Timestamp out of range: {0} ms")]
    InvalidTimestamp(i64),

    /// A busy interval straddles the tracker window. Callers must clamp
    /// with `Tracker::clamp_to_window` before applying.
    #[error("Interval {start}..{end} is not clamped to the window {window_start}..{window_end}")]
    UnclampedInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    },

    #[error("Invalid tracker configuration: {0}")]
    InvalidConfig(String),

    #[error("Reading speed must be positive, got {0} words per minute")]
    InvalidReadingSpeed(u32),
}

pub type Result<T> = std::result::Result<T, FreeTimeError>;
