//! Plan time to read unread mail.
//!
//! Builds a [`Tracker`] from the user's calendar, converts an unread word count
//! into reading time, credits reading sessions already on the calendar, and
//! proposes work-band slots for whatever is left.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::allocator::allocate;
use crate::band::Band;
use crate::config::{PlanConfig, TrackerConfig};
use crate::error::{FreeTimeError, Result};
use crate::interval::TimeInterval;
use crate::tracker::Tracker;

/// A calendar event as handed over by the calendar collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub summary: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPlan {
    pub word_count: u32,
    pub words_per_minute: u32,
    pub minutes_to_read: u32,
    /// Proposed reading slots, chronological. Empty when nothing is left to
    /// schedule.
    pub potential_times: Vec<TimeInterval>,
}

/// `ceil(word_count / words_per_minute)`.
///
/// # Errors
/// Returns `FreeTimeError::InvalidReadingSpeed` when `words_per_minute` is 0.
pub fn minutes_to_read(word_count: u32, words_per_minute: u32) -> Result<u32> {
    if words_per_minute == 0 {
        return Err(FreeTimeError::InvalidReadingSpeed(words_per_minute));
    }
    Ok(word_count.div_ceil(words_per_minute))
}

/// Propose reading slots in the work band of the window starting at `anchor`.
///
/// Every event is clamped to the tracker window and applied as busy time.
/// Events whose summary matches `config.preassigned_summary` also count, at
/// their full unclamped length, against the reading time still needed.
///
/// # Errors
/// Returns `FreeTimeError::InvalidInterval` for an event ending before it
/// starts, `InvalidReadingSpeed` for a zero reading speed,
/// `InvalidConfig` for a bad `tracker_config`, and `InvalidTimestamp` when
/// the window runs past the representable range.
pub fn plan_reading(
    anchor: DateTime<Utc>,
    events: &[CalendarEvent],
    word_count: u32,
    config: &PlanConfig,
    tracker_config: TrackerConfig,
) -> Result<ReadingPlan> {
    let minutes = minutes_to_read(word_count, config.words_per_minute)?;
    let mut tracker = Tracker::with_config(anchor, tracker_config)?;

    let mut preassigned = Duration::zero();
    for event in events {
        let iv = TimeInterval::new(event.start, event.end)?;
        if event.summary == config.preassigned_summary {
            preassigned = preassigned + iv.duration();
        }
        if let Some(clamped) = tracker.clamp_to_window(&iv) {
            tracker.apply_busy_interval(&clamped)?;
        }
    }

    let need = (Duration::minutes(i64::from(minutes)) - preassigned).max(Duration::zero());
    debug!(
        minutes,
        preassigned_ms = preassigned.num_milliseconds(),
        need_ms = need.num_milliseconds(),
        "reading time"
    );

    let potential_times = if need > Duration::zero() {
        allocate(&tracker.free_intervals_for(Band::Work), need)
    } else {
        Vec::new()
    };
    info!(slots = potential_times.len(), "reading plan ready");

    Ok(ReadingPlan {
        word_count,
        words_per_minute: config.words_per_minute,
        minutes_to_read: minutes,
        potential_times,
    })
}
