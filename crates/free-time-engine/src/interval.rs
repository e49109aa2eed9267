//! Half-open time intervals and the day-indexing helpers used by the tracker.
//!
//! All instants are UTC. On the wire an interval is a pair of epoch
//! milliseconds (`{"start": ms, "end": ms}`); deserialization goes through
//! [`TimeInterval::new`] so a reversed pair is rejected.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FreeTimeError, Result};

/// An immutable `[start, end)` range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "WireInterval", into = "WireInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct WireInterval {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    start: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    end: DateTime<Utc>,
}

impl TryFrom<WireInterval> for TimeInterval {
    type Error = FreeTimeError;

    fn try_from(wire: WireInterval) -> Result<Self> {
        TimeInterval::new(wire.start, wire.end)
    }
}

impl From<TimeInterval> for WireInterval {
    fn from(iv: TimeInterval) -> Self {
        WireInterval {
            start: iv.start,
            end: iv.end,
        }
    }
}

impl TimeInterval {
    /// Create an interval, rejecting `start > end`.
    ///
    /// # Errors
    /// Returns `FreeTimeError::InvalidInterval` when the bounds are reversed.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(FreeTimeError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create an interval from UTC epoch milliseconds.
    ///
    /// # Errors
    /// Returns `FreeTimeError::InvalidTimestamp` for a value chrono cannot
    /// represent, and `FreeTimeError::InvalidInterval` for reversed bounds.
    pub fn from_millis(start_ms: i64, end_ms: i64) -> Result<Self> {
        Self::new(instant_from_millis(start_ms)?, instant_from_millis(end_ms)?)
    }

    /// Bounds are already known to be ordered.
    pub(crate) fn ordered(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start <= end, "interval bounds out of order");
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Two intervals overlap when `a.start < b.end && b.start < a.end`.
    /// Touching intervals and empty intervals never overlap anything.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// Clip to `[lo, hi)`. Returns `None` when nothing non-empty is left.
    pub fn clamp(&self, lo: DateTime<Utc>, hi: DateTime<Utc>) -> Option<TimeInterval> {
        let start = self.start.max(lo);
        let end = self.end.min(hi);
        (start < end).then(|| TimeInterval::ordered(start, end))
    }

    /// The parts of `self` not covered by `busy`: at most one piece before it
    /// and one after it.
    pub fn subtract(&self, busy: &TimeInterval) -> (Option<TimeInterval>, Option<TimeInterval>) {
        if !self.overlaps(busy) {
            return (Some(*self), None);
        }
        let before = (self.start < busy.start).then(|| TimeInterval::ordered(self.start, busy.start));
        let after = (busy.end < self.end).then(|| TimeInterval::ordered(busy.end, self.end));
        (before, after)
    }
}

/// Convert UTC epoch milliseconds into an instant.
pub fn instant_from_millis(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).ok_or(FreeTimeError::InvalidTimestamp(ms))
}

/// Midnight (UTC) of the day containing `instant`.
pub fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Time elapsed since midnight of the day containing `instant`.
pub fn time_of_day(instant: DateTime<Utc>) -> Duration {
    instant - start_of_day(instant)
}

/// Whole calendar days from `anchor`'s day to `instant`'s day. Negative when
/// `instant` falls on an earlier day.
pub fn day_offset(anchor: DateTime<Utc>, instant: DateTime<Utc>) -> i64 {
    (instant.date_naive() - anchor.date_naive()).num_days()
}

/// Weekday of `instant`, Monday = 0 through Sunday = 6.
pub fn weekday_index(instant: DateTime<Utc>) -> u32 {
    instant.weekday().num_days_from_monday()
}

/// Sum of the durations of `intervals`.
pub fn total_duration(intervals: &[TimeInterval]) -> Duration {
    intervals
        .iter()
        .fold(Duration::zero(), |acc, iv| acc + iv.duration())
}
