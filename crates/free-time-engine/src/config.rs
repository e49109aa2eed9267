//! Tracker and planner configuration.

use serde::{Deserialize, Serialize};

use crate::band::DayBands;
use crate::error::{FreeTimeError, Result};

/// Longest window a tracker will allocate ledgers for.
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Shape of the rolling window a [`crate::Tracker`] accounts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub bands: DayBands,
    /// Number of calendar days in the window, starting with the anchor's day.
    pub window_days: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            bands: DayBands::default(),
            window_days: 5,
        }
    }
}

impl TrackerConfig {
    /// # Errors
    /// Returns `FreeTimeError::InvalidConfig` for a window outside
    /// `1..=MAX_WINDOW_DAYS` or inconsistent band boundaries.
    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(FreeTimeError::InvalidConfig(
                "window_days must be at least 1".to_string(),
            ));
        }
        if self.window_days > MAX_WINDOW_DAYS {
            return Err(FreeTimeError::InvalidConfig(format!(
                "window_days must be at most {}, got {}",
                MAX_WINDOW_DAYS, self.window_days
            )));
        }
        self.bands.validate()
    }
}

/// Settings for [`crate::planner::plan_reading`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    pub words_per_minute: u32,
    /// Calendar events with exactly this summary count as reading time that
    /// is already scheduled.
    pub preassigned_summary: String,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 50,
            preassigned_summary: "Read emails".to_string(),
        }
    }
}
