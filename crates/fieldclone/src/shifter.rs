//! Date-increment field shifting -- the per-field transform applied to clones.
//!
//! A [`FieldShifter`] rewrites the date-like values of one field on a newly
//! created clone, moving them forward by the configured increment scaled by
//! how many clones of the same source record it has already processed. The
//! first clone of a record moves one increment, the second two, and so on,
//! which spreads a batch of clones evenly across the calendar.
//!
//! Two value representations are supported, selected by [`ValueRepr`]:
//!
//! - [`ValueRepr::Calendar`] -- `YYYY-MM-DD` and `YYYY-MM-DDTHH:MM:SS`
//!   strings. Arithmetic is naive wall-clock; datetime results that cross a
//!   DST transition in the shifter's timezone get a one-hour correction.
//! - [`ValueRepr::Epoch`] -- decimal Unix epoch seconds, shifted with
//!   timezone-aware calendar arithmetic. No correction step: the zoned
//!   addition already lands on the right wall-clock offset.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{CloneError, Result};
use crate::interval::{add_to_naive, add_to_zoned, dst_active, IncrementConfig};
use crate::record::{Record, RecordId};

/// Timezone used when none is configured explicitly.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Los_Angeles;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Length of a date-only value such as `2019-02-21`. Values of this length
/// take the date-only parse/format path.
const DATE_ONLY_LEN: usize = 10;

/// How a raw field value is parsed, shifted, and written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueRepr {
    /// Calendar date / datetime strings.
    #[default]
    Calendar,
    /// Decimal Unix epoch seconds.
    Epoch,
}

/// Shifts the date values of one field across successive clones of a record.
///
/// The shifter owns the per-source clone counter, so one instance should live
/// for exactly one clone batch. [`FieldShifter::reset`] clears the counter
/// for reuse across unrelated batches.
#[derive(Debug, Clone)]
pub struct FieldShifter {
    config: IncrementConfig,
    repr: ValueRepr,
    timezone: Tz,
    clone_counts: HashMap<RecordId, u32>,
}

impl FieldShifter {
    /// A calendar-string shifter using [`DEFAULT_TIMEZONE`] for DST checks.
    pub fn calendar(config: IncrementConfig) -> Self {
        Self::calendar_in(config, DEFAULT_TIMEZONE)
    }

    /// A calendar-string shifter with an explicit DST reference timezone.
    pub fn calendar_in(config: IncrementConfig, timezone: Tz) -> Self {
        Self {
            config,
            repr: ValueRepr::Calendar,
            timezone,
            clone_counts: HashMap::new(),
        }
    }

    /// An epoch-seconds shifter using [`DEFAULT_TIMEZONE`].
    pub fn epoch(config: IncrementConfig) -> Self {
        Self::epoch_in(config, DEFAULT_TIMEZONE)
    }

    /// An epoch-seconds shifter with an explicit timezone.
    pub fn epoch_in(config: IncrementConfig, timezone: Tz) -> Self {
        Self {
            config,
            repr: ValueRepr::Epoch,
            timezone,
            clone_counts: HashMap::new(),
        }
    }

    pub fn config(&self) -> &IncrementConfig {
        &self.config
    }

    pub fn repr(&self) -> ValueRepr {
        self.repr
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// How many clones of `id` this shifter has processed so far.
    pub fn times_cloned(&self, id: RecordId) -> u32 {
        self.clone_counts.get(&id).copied().unwrap_or(0)
    }

    /// Clear the per-source clone counter.
    pub fn reset(&mut self) {
        self.clone_counts.clear();
    }

    /// Shift the values of `field` on `target`, a fresh clone of `original`.
    ///
    /// Does nothing when the increment is unset or `target` has no such
    /// field; neither case touches the clone counter. Otherwise every item's
    /// `value` and `end_value` (when present) is rewritten in place, moved
    /// forward by the configured increment times the number of clones of
    /// `original` seen so far.
    ///
    /// # Errors
    /// Fails on a value that does not parse in this shifter's representation,
    /// or when the shifted result leaves the representable range. `target` is
    /// left partially updated in that case; callers are expected to discard
    /// the clone.
    pub fn alter_field_value(
        &mut self,
        original: &Record,
        target: &mut Record,
        field: &str,
    ) -> Result<()> {
        let Some(amount) = self.config.amount() else {
            return Ok(());
        };
        let Some(items) = target.fields.get_mut(field) else {
            return Ok(());
        };

        // Track how many times this source record has been cloned; the count
        // scales the increment so each successive clone lands further out.
        let seen = self.clone_counts.entry(original.id).or_default();
        *seen += 1;
        let steps = *seen * amount;

        for item in items.iter_mut() {
            item.value = shift_value(self.repr, &self.config, self.timezone, &item.value, steps)?;
            if let Some(end) = item.end_value.take() {
                item.end_value = Some(shift_value(
                    self.repr,
                    &self.config,
                    self.timezone,
                    &end,
                    steps,
                )?);
            }
        }
        Ok(())
    }

    /// Shift a single raw value by `steps` units, outside any record context.
    ///
    /// `steps` plays the role of the effective increment (amount × clone
    /// order); the counter is not consulted or advanced.
    pub fn shift_raw(&self, raw: &str, steps: u32) -> Result<String> {
        shift_value(self.repr, &self.config, self.timezone, raw, steps)
    }
}

fn shift_value(
    repr: ValueRepr,
    config: &IncrementConfig,
    timezone: Tz,
    raw: &str,
    steps: u32,
) -> Result<String> {
    match repr {
        ValueRepr::Calendar => shift_calendar(config, timezone, raw, steps),
        ValueRepr::Epoch => shift_epoch(config, timezone, raw, steps),
    }
}

/// Shift a calendar date or datetime string.
///
/// Date-only values (length 10) are lifted to midnight for the arithmetic and
/// formatted back without a time component; the DST correction only applies
/// to datetime values.
fn shift_calendar(config: &IncrementConfig, timezone: Tz, raw: &str, steps: u32) -> Result<String> {
    if raw.len() == DATE_ONLY_LEN {
        let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| CloneError::InvalidDate(raw.to_string()))?;
        let shifted = add_to_naive(date.and_time(NaiveTime::MIN), config.unit, steps)
            .ok_or_else(|| CloneError::Overflow(raw.to_string()))?;
        return Ok(shifted.format(DATE_FORMAT).to_string());
    }

    let start = NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .map_err(|_| CloneError::InvalidDate(raw.to_string()))?;

    let dst_before =
        dst_active(timezone, start).ok_or_else(|| CloneError::Overflow(raw.to_string()))?;

    let mut shifted = add_to_naive(start, config.unit, steps)
        .ok_or_else(|| CloneError::Overflow(raw.to_string()))?;

    // When the shift crosses a DST transition the wall-clock result is off by
    // the transition hour; nudge it back. Entering DST needs -1h, leaving
    // DST needs +1h.
    let dst_after =
        dst_active(timezone, shifted).ok_or_else(|| CloneError::Overflow(raw.to_string()))?;
    if dst_after != dst_before {
        let correction = if dst_before {
            Duration::hours(1)
        } else {
            Duration::hours(-1)
        };
        shifted = shifted
            .checked_add_signed(correction)
            .ok_or_else(|| CloneError::Overflow(raw.to_string()))?;
    }

    Ok(shifted.format(DATETIME_FORMAT).to_string())
}

/// Shift a decimal Unix epoch value with zone-aware calendar arithmetic.
fn shift_epoch(config: &IncrementConfig, timezone: Tz, raw: &str, steps: u32) -> Result<String> {
    let seconds: i64 = raw
        .trim()
        .parse()
        .map_err(|_| CloneError::InvalidTimestamp(raw.to_string()))?;
    let instant = Utc
        .timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| CloneError::InvalidTimestamp(raw.to_string()))?;

    let local = instant.with_timezone(&timezone);
    let shifted = add_to_zoned(local, config.unit, steps)
        .ok_or_else(|| CloneError::Overflow(raw.to_string()))?;

    Ok(shifted.timestamp().to_string())
}
