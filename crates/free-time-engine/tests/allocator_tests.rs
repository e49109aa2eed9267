//! Tests for greedy slot allocation, standalone and on top of a tracker.

use chrono::{DateTime, Duration, TimeZone, Utc};
use free_time_engine::band::Band;
use free_time_engine::interval::{total_duration, TimeInterval};
use free_time_engine::{allocate, Tracker};

fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap()
        + Duration::days(i64::from(day))
        + Duration::hours(i64::from(hour))
        + Duration::minutes(i64::from(min))
}

fn iv(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeInterval {
    TimeInterval::new(start, end).unwrap()
}

#[test]
fn exact_fit_returns_interval_unmodified() {
    let free = vec![iv(at(0, 10, 0), at(0, 10, 10))];
    let slots = allocate(&free, Duration::minutes(10));
    assert_eq!(slots, free);
}

#[test]
fn zero_need_returns_nothing() {
    let free = vec![iv(at(0, 10, 0), at(0, 12, 0))];
    assert!(allocate(&free, Duration::zero()).is_empty());
}

#[test]
fn empty_free_list_returns_nothing() {
    assert!(allocate(&[], Duration::hours(1)).is_empty());
}

#[test]
fn last_interval_is_truncated() {
    let free = vec![
        iv(at(0, 10, 0), at(0, 10, 30)),
        iv(at(0, 14, 0), at(0, 18, 0)),
        iv(at(1, 10, 0), at(1, 18, 0)),
    ];
    let slots = allocate(&free, Duration::minutes(45));

    assert_eq!(
        slots,
        vec![
            iv(at(0, 10, 0), at(0, 10, 30)),
            iv(at(0, 14, 0), at(0, 14, 15)),
        ]
    );
    assert_eq!(total_duration(&slots), Duration::minutes(45));
}

#[test]
fn insufficient_capacity_returns_everything() {
    let free = vec![
        iv(at(0, 10, 0), at(0, 11, 0)),
        iv(at(2, 15, 0), at(2, 16, 0)),
    ];
    let slots = allocate(&free, Duration::hours(5));

    assert_eq!(slots, free);
    assert!(total_duration(&slots) < Duration::hours(5));
}

#[test]
fn need_is_split_around_a_busy_gap() {
    let mut tracker = Tracker::new(at(0, 0, 0)).unwrap();
    tracker
        .apply_busy_interval(&iv(at(0, 10, 5), at(0, 10, 30)))
        .unwrap();

    let slots = allocate(
        &tracker.free_intervals_for(Band::Work),
        Duration::minutes(30),
    );

    assert_eq!(
        slots,
        vec![
            iv(at(0, 10, 0), at(0, 10, 5)),
            iv(at(0, 10, 30), at(0, 10, 55)),
        ]
    );
}

#[test]
fn need_spills_into_the_next_day() {
    let tracker = Tracker::new(at(0, 0, 0)).unwrap();
    let slots = allocate(&tracker.free_intervals_for(Band::Work), Duration::hours(9));

    assert_eq!(
        slots,
        vec![
            iv(at(0, 10, 0), at(0, 18, 0)),
            iv(at(1, 10, 0), at(1, 11, 0)),
        ]
    );
}

#[test]
fn allocation_is_deterministic() {
    let tracker = Tracker::new(at(0, 13, 0)).unwrap();
    let free = tracker.free_intervals();
    assert_eq!(
        allocate(&free, Duration::minutes(400)),
        allocate(&free, Duration::minutes(400))
    );
}
