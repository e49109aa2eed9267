//! Daily work/personal bands and the boundary policy tables.
//!
//! A day carries two parallel ledgers. The personal band spans
//! `[personal_begin, personal_end)` and the work band `[work_begin, work_end)`
//! sits inside it. A busy interval's overlap with the work band is charged to
//! the work ledger; its overlap with the personal-only parts
//! (`[personal_begin, work_begin)` and `[work_end, personal_end)`) is charged
//! to the personal ledger.
//!
//! Every way a busy interval can touch a day reduces to one of four
//! [`BoundaryRegime`]s, and each regime maps to a [`DayDeduction`]:
//!
//! | regime          | when                                              |
//! |-----------------|---------------------------------------------------|
//! | `WholeDay`      | starts before `personal_begin`, ends at/after `personal_end`, or spans the day |
//! | `EndOnly(end)`  | began before the personal band (or an earlier day) |
//! | `StartOnly(s)`  | runs to/past `personal_end` (or a later day)       |
//! | `SameDayMixed`  | fully inside `[personal_begin, personal_end)`      |

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{FreeTimeError, Result};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// One of the two parallel daily ledgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Work,
    Personal,
}

/// Band boundaries as minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayBands {
    pub personal_begin: u32,
    pub work_begin: u32,
    pub work_end: u32,
    pub personal_end: u32,
}

impl Default for DayBands {
    /// Personal time 07:00-23:00, work time 10:00-18:00.
    fn default() -> Self {
        Self {
            personal_begin: 7 * 60,
            work_begin: 10 * 60,
            work_end: 18 * 60,
            personal_end: 23 * 60,
        }
    }
}

/// How a busy interval intersects a single day, in time-of-day terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryRegime {
    WholeDay,
    /// Consumes everything from this time-of-day to the end of the day.
    StartOnly(Duration),
    /// Consumes everything from the start of the day to this time-of-day.
    EndOnly(Duration),
    SameDayMixed { start: Duration, end: Duration },
}

/// What to take off one ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deduction {
    Nothing,
    Amount(Duration),
    /// Set the ledger to zero.
    All,
}

impl Deduction {
    /// Apply to a ledger value, flooring at zero.
    pub fn apply(self, remaining: Duration) -> Duration {
        match self {
            Deduction::Nothing => remaining,
            Deduction::Amount(amount) => (remaining - amount).max(Duration::zero()),
            Deduction::All => Duration::zero(),
        }
    }

    fn amount(amount: Duration) -> Self {
        if amount > Duration::zero() {
            Deduction::Amount(amount)
        } else {
            Deduction::Nothing
        }
    }
}

/// The pair of deductions a regime produces for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayDeduction {
    pub work: Deduction,
    pub personal: Deduction,
}

impl DayDeduction {
    const NONE: DayDeduction = DayDeduction {
        work: Deduction::Nothing,
        personal: Deduction::Nothing,
    };

    const ALL: DayDeduction = DayDeduction {
        work: Deduction::All,
        personal: Deduction::All,
    };

    pub fn for_band(&self, band: Band) -> Deduction {
        match band {
            Band::Work => self.work,
            Band::Personal => self.personal,
        }
    }
}

impl DayBands {
    /// Check `personal_begin <= work_begin <= work_end <= personal_end <= 24:00`.
    ///
    /// # Errors
    /// Returns `FreeTimeError::InvalidConfig` naming the first violated bound.
    pub fn validate(&self) -> Result<()> {
        let ordered = [
            ("personal_begin", self.personal_begin),
            ("work_begin", self.work_begin),
            ("work_end", self.work_end),
            ("personal_end", self.personal_end),
        ];
        for pair in ordered.windows(2) {
            let (lo_name, lo) = pair[0];
            let (hi_name, hi) = pair[1];
            if lo > hi {
                return Err(FreeTimeError::InvalidConfig(format!(
                    "{lo_name} ({lo}) must not be after {hi_name} ({hi})"
                )));
            }
        }
        if self.personal_end > MINUTES_PER_DAY {
            return Err(FreeTimeError::InvalidConfig(format!(
                "personal_end ({}) is past midnight",
                self.personal_end
            )));
        }
        Ok(())
    }

    pub fn personal_begin(&self) -> Duration {
        Duration::minutes(i64::from(self.personal_begin))
    }

    pub fn work_begin(&self) -> Duration {
        Duration::minutes(i64::from(self.work_begin))
    }

    pub fn work_end(&self) -> Duration {
        Duration::minutes(i64::from(self.work_end))
    }

    pub fn personal_end(&self) -> Duration {
        Duration::minutes(i64::from(self.personal_end))
    }

    /// Full-day ledger capacity of a band.
    pub fn capacity(&self, band: Band) -> Duration {
        match band {
            Band::Work => self.work_end() - self.work_begin(),
            Band::Personal => self.personal_end() - self.personal_begin(),
        }
    }

    /// Classify a busy interval that starts and ends on the same day.
    pub fn classify(&self, start: Duration, end: Duration) -> BoundaryRegime {
        let before_personal = start < self.personal_begin();
        let reaches_end = end >= self.personal_end();
        match (before_personal, reaches_end) {
            (true, true) => BoundaryRegime::WholeDay,
            (true, false) => BoundaryRegime::EndOnly(end),
            (false, true) => BoundaryRegime::StartOnly(start),
            (false, false) => BoundaryRegime::SameDayMixed { start, end },
        }
    }

    pub fn deduction(&self, regime: BoundaryRegime) -> DayDeduction {
        match regime {
            BoundaryRegime::WholeDay => DayDeduction::ALL,
            BoundaryRegime::StartOnly(start) => self.from_start(start),
            BoundaryRegime::EndOnly(end) => self.until_end(end),
            BoundaryRegime::SameDayMixed { start, end } => self.within(start, end),
        }
    }

    /// Busy from `start` through the end of the day.
    fn from_start(&self, start: Duration) -> DayDeduction {
        let (pb, wb, we, pe) = self.bounds();
        if start < pb {
            DayDeduction::ALL
        } else if start < wb {
            DayDeduction {
                work: Deduction::All,
                personal: Deduction::amount((wb - start) + (pe - we)),
            }
        } else if start < we {
            DayDeduction {
                work: Deduction::amount(we - start),
                personal: Deduction::amount(pe - we),
            }
        } else if start < pe {
            DayDeduction {
                work: Deduction::Nothing,
                personal: Deduction::amount(pe - start),
            }
        } else {
            DayDeduction::NONE
        }
    }

    /// Busy from the start of the day up to `end`.
    fn until_end(&self, end: Duration) -> DayDeduction {
        let (pb, wb, we, pe) = self.bounds();
        if end >= pe {
            DayDeduction::ALL
        } else if end >= we {
            DayDeduction {
                work: Deduction::All,
                personal: Deduction::amount((wb - pb) + (end - we)),
            }
        } else if end >= wb {
            DayDeduction {
                work: Deduction::amount(end - wb),
                personal: Deduction::amount(wb - pb),
            }
        } else if end >= pb {
            DayDeduction {
                work: Deduction::Nothing,
                personal: Deduction::amount(end - pb),
            }
        } else {
            DayDeduction::NONE
        }
    }

    /// Busy for `[start, end)` inside the personal band.
    fn within(&self, start: Duration, end: Duration) -> DayDeduction {
        let (_, wb, we, _) = self.bounds();
        let personal = (end.min(wb) - start.min(wb)) + (end.max(we) - start.max(we));
        let work = (end - start) - personal;
        DayDeduction {
            work: Deduction::amount(work),
            personal: Deduction::amount(personal),
        }
    }

    fn bounds(&self) -> (Duration, Duration, Duration, Duration) {
        (
            self.personal_begin(),
            self.work_begin(),
            self.work_end(),
            self.personal_end(),
        )
    }
}
