//! Greedy allocation of a required duration against free intervals.

use chrono::Duration;

use crate::interval::TimeInterval;

/// Walk `free` in order and return the shortest prefix covering `need`, with
/// the last interval truncated so the total is exactly `need`.
///
/// When `free` holds less than `need` in total, every interval is returned;
/// callers detect the shortfall by comparing
/// [`crate::interval::total_duration`] of the result with `need`. A
/// non-positive `need` yields an empty list.
pub fn allocate(free: &[TimeInterval], need: Duration) -> Vec<TimeInterval> {
    let mut slots = Vec::new();
    let mut remaining = need;
    if remaining <= Duration::zero() {
        return slots;
    }

    for iv in free {
        if iv.duration() < remaining {
            remaining = remaining - iv.duration();
            slots.push(*iv);
        } else {
            slots.push(TimeInterval::ordered(iv.start(), iv.start() + remaining));
            break;
        }
    }

    slots
}
