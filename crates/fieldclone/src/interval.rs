//! Increment configuration and calendar-aware interval arithmetic.
//!
//! Year/month/week/day steps use calendar arithmetic (`Months`/`Days`), so
//! month and year addition respects variable month lengths and day-based
//! addition preserves wall-clock time on zoned values. Hour/minute/second
//! steps are fixed-duration.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, Duration, LocalResult, Months, NaiveDateTime, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use serde::{Deserialize, Serialize};

use crate::error::{CloneError, Result};

/// The unit a configured increment is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncrementUnit {
    #[default]
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl IncrementUnit {
    pub const ALL: [IncrementUnit; 7] = [
        IncrementUnit::Year,
        IncrementUnit::Month,
        IncrementUnit::Week,
        IncrementUnit::Day,
        IncrementUnit::Hour,
        IncrementUnit::Minute,
        IncrementUnit::Second,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IncrementUnit::Year => "year",
            IncrementUnit::Month => "month",
            IncrementUnit::Week => "week",
            IncrementUnit::Day => "day",
            IncrementUnit::Hour => "hour",
            IncrementUnit::Minute => "minute",
            IncrementUnit::Second => "second",
        }
    }
}

impl fmt::Display for IncrementUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncrementUnit {
    type Err = CloneError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" | "years" => Ok(IncrementUnit::Year),
            "month" | "months" => Ok(IncrementUnit::Month),
            "week" | "weeks" => Ok(IncrementUnit::Week),
            "day" | "days" => Ok(IncrementUnit::Day),
            "hour" | "hours" => Ok(IncrementUnit::Hour),
            "minute" | "minutes" => Ok(IncrementUnit::Minute),
            "second" | "seconds" => Ok(IncrementUnit::Second),
            other => Err(CloneError::InvalidUnit(other.to_string())),
        }
    }
}

/// Per-field increment configuration.
///
/// An unset (or zero) increment disables the transform entirely -- the shifter
/// treats it as "do not change". The amount is bounded to 1..=12, matching
/// the range offered by the configuration UI this models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncrementConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment: Option<u32>,
    #[serde(default)]
    pub unit: IncrementUnit,
}

impl IncrementConfig {
    /// A validated active configuration.
    ///
    /// # Errors
    /// Returns `CloneError::InvalidIncrement` if `amount` is outside 1..=12.
    pub fn new(amount: u32, unit: IncrementUnit) -> Result<Self> {
        if !(1..=12).contains(&amount) {
            return Err(CloneError::InvalidIncrement(amount));
        }
        Ok(Self {
            increment: Some(amount),
            unit,
        })
    }

    /// A configuration that leaves field values untouched.
    pub fn unset() -> Self {
        Self::default()
    }

    /// The configured amount, if the configuration is active.
    pub fn amount(&self) -> Option<u32> {
        match self.increment {
            Some(n) if n > 0 => Some(n),
            _ => None,
        }
    }
}

/// Add `steps` units to a naive local datetime.
///
/// Returns `None` when the result leaves chrono's representable range.
pub fn add_to_naive(dt: NaiveDateTime, unit: IncrementUnit, steps: u32) -> Option<NaiveDateTime> {
    match unit {
        IncrementUnit::Year => dt.checked_add_months(Months::new(steps.checked_mul(12)?)),
        IncrementUnit::Month => dt.checked_add_months(Months::new(steps)),
        IncrementUnit::Week => dt.checked_add_days(Days::new(u64::from(steps) * 7)),
        IncrementUnit::Day => dt.checked_add_days(Days::new(u64::from(steps))),
        IncrementUnit::Hour => dt.checked_add_signed(Duration::hours(i64::from(steps))),
        IncrementUnit::Minute => dt.checked_add_signed(Duration::minutes(i64::from(steps))),
        IncrementUnit::Second => dt.checked_add_signed(Duration::seconds(i64::from(steps))),
    }
}

/// Add `steps` units to a timezone-aware datetime.
///
/// Calendar units (`Months`/`Days`) preserve local wall-clock time and
/// re-resolve the UTC offset in `dt`'s zone; hour/minute/second units move
/// the absolute instant.
pub fn add_to_zoned(dt: DateTime<Tz>, unit: IncrementUnit, steps: u32) -> Option<DateTime<Tz>> {
    match unit {
        IncrementUnit::Year => dt.checked_add_months(Months::new(steps.checked_mul(12)?)),
        IncrementUnit::Month => dt.checked_add_months(Months::new(steps)),
        IncrementUnit::Week => dt.checked_add_days(Days::new(u64::from(steps) * 7)),
        IncrementUnit::Day => dt.checked_add_days(Days::new(u64::from(steps))),
        IncrementUnit::Hour => dt.checked_add_signed(Duration::hours(i64::from(steps))),
        IncrementUnit::Minute => dt.checked_add_signed(Duration::minutes(i64::from(steps))),
        IncrementUnit::Second => dt.checked_add_signed(Duration::seconds(i64::from(steps))),
    }
}

/// Whether the given local instant falls in daylight saving time in `tz`.
///
/// Ambiguous local times (the repeated hour at DST end) resolve to the
/// earliest mapping. Local times inside a spring-forward gap are probed one
/// hour later, which lands on the post-transition side.
pub fn dst_active(tz: Tz, local: NaiveDateTime) -> Option<bool> {
    let resolved = match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => local
            .checked_add_signed(Duration::hours(1))
            .and_then(|probe| tz.from_local_datetime(&probe).earliest()),
    }?;
    Some(resolved.offset().dst_offset() != Duration::zero())
}
