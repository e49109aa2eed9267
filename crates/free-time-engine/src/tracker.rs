//! Day-bucketed free-time accounting over a rolling window.
//!
//! A [`Tracker`] is built once per computation from an anchor instant. It owns
//! two ledgers per day (work and personal remaining durations) plus the
//! concrete free pieces of each band, and both shrink as busy intervals are
//! applied. Time before the anchor on day 0 is treated as already busy.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::band::{Band, BoundaryRegime, DayDeduction};
use crate::config::TrackerConfig;
use crate::error::{FreeTimeError, Result};
use crate::interval::{self, TimeInterval};

/// Read-only view of the ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacitySnapshot {
    /// Weekday of the anchor, Monday = 0 through Sunday = 6.
    pub start_day: u32,
    /// Remaining work time per day, in milliseconds.
    pub work_per_day_ms: Vec<i64>,
    /// Remaining personal time per day, in milliseconds.
    pub personal_per_day_ms: Vec<i64>,
}

impl CapacitySnapshot {
    pub fn total_work(&self) -> Duration {
        Duration::milliseconds(self.work_per_day_ms.iter().sum())
    }

    pub fn total_personal(&self) -> Duration {
        Duration::milliseconds(self.personal_per_day_ms.iter().sum())
    }
}

#[derive(Debug, Clone)]
pub struct Tracker {
    anchor: DateTime<Utc>,
    day_zero: DateTime<Utc>,
    window_end: DateTime<Utc>,
    config: TrackerConfig,
    work: Vec<Duration>,
    personal: Vec<Duration>,
    work_free: Vec<TimeInterval>,
    personal_free: Vec<TimeInterval>,
}

impl Tracker {
    /// Tracker with the default 5-day window and 07:00/10:00/18:00/23:00 bands.
    ///
    /// # Errors
    /// Returns `FreeTimeError::InvalidTimestamp` when the window would end
    /// past the last instant chrono can represent.
    pub fn new(anchor: DateTime<Utc>) -> Result<Self> {
        Self::build(anchor, TrackerConfig::default())
    }

    /// # Errors
    /// Returns `FreeTimeError::InvalidConfig` if `config` fails validation,
    /// and `FreeTimeError::InvalidTimestamp` when the window cannot be
    /// represented.
    pub fn with_config(anchor: DateTime<Utc>, config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Self::build(anchor, config)
    }

    fn build(anchor: DateTime<Utc>, config: TrackerConfig) -> Result<Self> {
        let days = config.window_days as usize;
        let bands = config.bands;
        let day_zero = interval::start_of_day(anchor);
        let window_end = day_zero
            .checked_add_signed(Duration::days(i64::from(config.window_days)))
            .ok_or(FreeTimeError::InvalidTimestamp(anchor.timestamp_millis()))?;

        let mut work_free = Vec::with_capacity(days);
        let mut personal_free = Vec::with_capacity(days * 2);
        let mut midnight = day_zero;
        for _ in 0..days {
            let piece = |from: Duration, to: Duration| {
                (from < to).then(|| TimeInterval::ordered(midnight + from, midnight + to))
            };
            personal_free.extend(piece(bands.personal_begin(), bands.work_begin()));
            work_free.extend(piece(bands.work_begin(), bands.work_end()));
            personal_free.extend(piece(bands.work_end(), bands.personal_end()));
            midnight += Duration::days(1);
        }

        let mut tracker = Self {
            anchor,
            day_zero,
            window_end,
            config,
            work: vec![bands.capacity(Band::Work); days],
            personal: vec![bands.capacity(Band::Personal); days],
            work_free,
            personal_free,
        };
        tracker.consume(&TimeInterval::ordered(day_zero, anchor));
        Ok(tracker)
    }

    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// `[anchor, midnight after the last window day)`. Time before the
    /// anchor is already charged as elapsed.
    pub fn window(&self) -> TimeInterval {
        TimeInterval::ordered(self.anchor, self.window_end)
    }

    /// Clip a raw event to the window so it can be applied. `None` when it
    /// lies entirely outside.
    pub fn clamp_to_window(&self, iv: &TimeInterval) -> Option<TimeInterval> {
        let window = self.window();
        iv.clamp(window.start(), window.end())
    }

    /// Subtract a busy interval from the ledgers and the free pieces.
    ///
    /// Returns `Ok(false)` without touching state when `iv` lies entirely
    /// outside the window.
    ///
    /// # Errors
    /// Returns `FreeTimeError::UnclampedInterval` when `iv` straddles a window
    /// edge; clamp it with [`Tracker::clamp_to_window`] first.
    pub fn apply_busy_interval(&mut self, iv: &TimeInterval) -> Result<bool> {
        let window = self.window();
        if iv.end() <= window.start() || iv.start() >= window.end() {
            debug!(start = %iv.start(), end = %iv.end(), "busy interval outside window, skipped");
            return Ok(false);
        }
        if iv.start() < window.start() || iv.end() > window.end() {
            return Err(FreeTimeError::UnclampedInterval {
                start: iv.start(),
                end: iv.end(),
                window_start: window.start(),
                window_end: window.end(),
            });
        }
        debug!(start = %iv.start(), end = %iv.end(), "applying busy interval");
        self.consume(iv);
        Ok(true)
    }

    /// Remaining ledger value for `band` on `day`, or `None` outside the window.
    pub fn remaining(&self, band: Band, day: usize) -> Option<Duration> {
        self.ledger(band).get(day).copied()
    }

    pub fn snapshot(&self) -> CapacitySnapshot {
        let millis = |ledger: &[Duration]| -> Vec<i64> {
            ledger.iter().map(Duration::num_milliseconds).collect()
        };
        CapacitySnapshot {
            start_day: interval::weekday_index(self.anchor),
            work_per_day_ms: millis(&self.work),
            personal_per_day_ms: millis(&self.personal),
        }
    }

    /// Free pieces of one band in chronological order. Days whose ledger for
    /// that band has run out contribute nothing.
    pub fn free_intervals_for(&self, band: Band) -> Vec<TimeInterval> {
        let pieces = match band {
            Band::Work => &self.work_free,
            Band::Personal => &self.personal_free,
        };
        let ledger = self.ledger(band);
        pieces
            .iter()
            .filter(|piece| {
                let day = interval::day_offset(self.day_zero, piece.start());
                usize::try_from(day)
                    .ok()
                    .and_then(|day| ledger.get(day))
                    .is_some_and(|left| *left > Duration::zero())
            })
            .copied()
            .collect()
    }

    /// Free pieces of both bands, merged chronologically.
    pub fn free_intervals(&self) -> Vec<TimeInterval> {
        let mut all = self.free_intervals_for(Band::Personal);
        all.extend(self.free_intervals_for(Band::Work));
        all.sort();
        all
    }

    fn ledger(&self, band: Band) -> &[Duration] {
        match band {
            Band::Work => &self.work,
            Band::Personal => &self.personal,
        }
    }

    /// `iv` must lie within the window's calendar days.
    fn consume(&mut self, iv: &TimeInterval) {
        let begin_day = interval::day_offset(self.day_zero, iv.start());
        let end_day = interval::day_offset(self.day_zero, iv.end());
        let last_day = end_day.min(i64::from(self.config.window_days) - 1);
        debug_assert!((0..=last_day).contains(&begin_day) || iv.is_empty());

        let bands = self.config.bands;
        let start_tod = interval::time_of_day(iv.start());
        let end_tod = interval::time_of_day(iv.end());

        for day in begin_day..=last_day {
            let regime = if day == begin_day && day == end_day {
                bands.classify(start_tod, end_tod)
            } else if day == begin_day {
                BoundaryRegime::StartOnly(start_tod)
            } else if day == end_day {
                BoundaryRegime::EndOnly(end_tod)
            } else {
                BoundaryRegime::WholeDay
            };
            trace!(day, ?regime, "boundary regime");
            self.deduct(day as usize, bands.deduction(regime));
        }

        subtract_all(&mut self.work_free, iv);
        subtract_all(&mut self.personal_free, iv);
    }

    fn deduct(&mut self, day: usize, deduction: DayDeduction) {
        for (band, ledger) in [(Band::Work, &mut self.work), (Band::Personal, &mut self.personal)] {
            let before = ledger[day];
            let after = deduction.for_band(band).apply(before);
            if after == Duration::zero() && before > Duration::zero() {
                debug!(day, ?band, "ledger exhausted");
            }
            ledger[day] = after;
        }
    }
}

fn subtract_all(pieces: &mut Vec<TimeInterval>, busy: &TimeInterval) {
    let mut kept = Vec::with_capacity(pieces.len() + 1);
    for piece in pieces.drain(..) {
        let (before, after) = piece.subtract(busy);
        kept.extend(before);
        kept.extend(after);
    }
    *pieces = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn anchor_mid_morning_consumes_elapsed_time_on_day_zero() {
        let anchor = Utc.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap();
        let tracker = Tracker::new(anchor).unwrap();
        // End-of-interval policy at 08:00: 1h of personal gone, work untouched.
        assert_eq!(
            tracker.remaining(Band::Personal, 0),
            Some(Duration::hours(15))
        );
        assert_eq!(tracker.remaining(Band::Work, 0), Some(Duration::hours(8)));
        assert_eq!(tracker.remaining(Band::Work, 5), None);
    }

    #[test]
    fn zero_length_interval_changes_nothing() {
        let anchor = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();
        let mut tracker = Tracker::new(anchor).unwrap();
        let before = tracker.snapshot();
        let noon = Utc.with_ymd_and_hms(2026, 3, 17, 12, 0, 0).unwrap();
        assert!(tracker
            .apply_busy_interval(&TimeInterval::new(noon, noon).unwrap())
            .unwrap());
        assert_eq!(tracker.snapshot(), before);
        assert_eq!(tracker.free_intervals_for(Band::Work).len(), 5);
    }
}
