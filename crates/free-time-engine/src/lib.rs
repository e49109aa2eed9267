//! # free-time-engine
//!
//! Work/personal free-time accounting over a rolling window of days, and
//! greedy allocation of a required duration against what is left.
//!
//! A [`Tracker`] is anchored at an instant (usually "now"). It keeps two
//! parallel per-day ledgers, one for the work band (10:00-18:00 by default)
//! and one for the personal band (07:00-23:00), and shrinks them as busy
//! intervals from the calendar are applied. [`allocate`] then turns the free
//! intervals that remain into concrete proposed slots.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use free_time_engine::{allocate, Band, TimeInterval, Tracker};
//!
//! let anchor = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();
//! let mut tracker = Tracker::new(anchor).unwrap();
//!
//! let meeting = TimeInterval::new(
//!     Utc.with_ymd_and_hms(2026, 3, 16, 10, 5, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2026, 3, 16, 10, 30, 0).unwrap(),
//! )
//! .unwrap();
//! tracker.apply_busy_interval(&meeting).unwrap();
//!
//! let slots = allocate(&tracker.free_intervals_for(Band::Work), Duration::minutes(30));
//! assert_eq!(slots.len(), 2);
//! assert_eq!(slots[0].end(), meeting.start());
//! assert_eq!(slots[1].start(), meeting.end());
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — `TimeInterval` and day-indexing helpers
//! - [`band`] — band boundaries and the per-day boundary policy tables
//! - [`tracker`] — the capacity tracker
//! - [`allocator`] — greedy slot allocation
//! - [`planner`] — reading-time planning on top of tracker + allocator
//! - [`config`] — tracker and planner settings
//! - [`error`] — error types

pub mod allocator;
pub mod band;
pub mod config;
pub mod error;
pub mod interval;
pub mod planner;
pub mod tracker;

pub use allocator::allocate;
pub use band::{Band, BoundaryRegime, DayBands};
pub use config::{PlanConfig, TrackerConfig};
pub use error::FreeTimeError;
pub use interval::{total_duration, TimeInterval};
pub use planner::{plan_reading, CalendarEvent, ReadingPlan};
pub use tracker::{CapacitySnapshot, Tracker};
