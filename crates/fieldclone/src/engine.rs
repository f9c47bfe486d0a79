//! Batch clone engine -- produces N clones per record and runs the configured
//! field shifts on each one.
//!
//! One [`FieldShifter`] is built per [`FieldShiftSpec`] per batch, so the
//! per-source clone counters start fresh for every call to [`clone_records`]
//! and successive clones of one record step 1×, 2×, 3×… increments out.

use std::str::FromStr;

use chrono_tz::Tz;

use crate::error::{CloneError, Result};
use crate::interval::{IncrementConfig, IncrementUnit};
use crate::record::Record;
use crate::shifter::{FieldShifter, ValueRepr, DEFAULT_TIMEZONE};

/// Configuration of one per-field transform in a clone batch.
#[derive(Debug, Clone)]
pub struct FieldShiftSpec {
    /// Name of the field to shift on each clone.
    pub field: String,
    /// Value representation the field holds.
    pub repr: ValueRepr,
    /// Increment amount and unit.
    pub config: IncrementConfig,
    /// Timezone override for this field; falls back to the batch timezone.
    pub timezone: Option<Tz>,
}

impl FieldShiftSpec {
    pub fn calendar(field: impl Into<String>, config: IncrementConfig) -> Self {
        Self {
            field: field.into(),
            repr: ValueRepr::Calendar,
            config,
            timezone: None,
        }
    }

    pub fn epoch(field: impl Into<String>, config: IncrementConfig) -> Self {
        Self {
            field: field.into(),
            repr: ValueRepr::Epoch,
            config,
            timezone: None,
        }
    }

    /// Pin this field's shifts to a specific timezone.
    pub fn in_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = Some(timezone);
        self
    }

    /// Switch the value representation to epoch seconds.
    pub fn as_epoch(mut self) -> Self {
        self.repr = ValueRepr::Epoch;
        self
    }

    fn build_shifter(&self, batch_timezone: Tz) -> FieldShifter {
        let tz = self.timezone.unwrap_or(batch_timezone);
        match self.repr {
            ValueRepr::Calendar => FieldShifter::calendar_in(self.config, tz),
            ValueRepr::Epoch => FieldShifter::epoch_in(self.config, tz),
        }
    }
}

impl FromStr for FieldShiftSpec {
    type Err = CloneError;

    /// Parse the `FIELD=AMOUNT:UNIT` grammar, e.g. `event_date=2:week`.
    ///
    /// The resulting spec uses the calendar representation; callers wanting
    /// epoch semantics chain [`FieldShiftSpec::as_epoch`].
    fn from_str(s: &str) -> Result<Self> {
        let (field, shift) = s
            .split_once('=')
            .ok_or_else(|| CloneError::InvalidShiftSpec(s.to_string()))?;
        let (amount, unit) = shift
            .split_once(':')
            .ok_or_else(|| CloneError::InvalidShiftSpec(s.to_string()))?;

        if field.trim().is_empty() {
            return Err(CloneError::InvalidShiftSpec(s.to_string()));
        }

        let amount: u32 = amount
            .trim()
            .parse()
            .map_err(|_| CloneError::InvalidShiftSpec(s.to_string()))?;
        let unit: IncrementUnit = unit.parse()?;

        Ok(Self::calendar(
            field.trim(),
            IncrementConfig::new(amount, unit)?,
        ))
    }
}

/// Options for one clone batch.
#[derive(Debug, Clone)]
pub struct CloneOptions {
    /// How many clones to produce per original record.
    pub count: u32,
    /// Prefix prepended (space-separated) to each clone's title.
    pub prepend_title: Option<String>,
    /// Batch-wide timezone for shifts that do not carry their own.
    pub timezone: Option<Tz>,
    /// Per-field transforms, applied to every clone in order.
    pub shifts: Vec<FieldShiftSpec>,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            count: 1,
            prepend_title: None,
            timezone: None,
            shifts: Vec::new(),
        }
    }
}

impl CloneOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Clone each record `options.count` times, applying the configured field
/// shifts to every clone.
///
/// Clones get fresh sequential ids starting past the highest input id, and
/// an optional title prefix. The originals are not modified.
///
/// # Errors
/// Propagates the first field-shift failure; no clones are returned in that
/// case.
pub fn clone_records(originals: &[Record], options: &CloneOptions) -> Result<Vec<Record>> {
    let batch_timezone = options.timezone.unwrap_or(DEFAULT_TIMEZONE);
    let mut shifters: Vec<(String, FieldShifter)> = options
        .shifts
        .iter()
        .map(|spec| (spec.field.clone(), spec.build_shifter(batch_timezone)))
        .collect();

    let mut next_id = originals.iter().map(|r| r.id).max().map_or(1, |max| max + 1);
    let mut clones = Vec::with_capacity(originals.len() * options.count as usize);

    for original in originals {
        for _ in 0..options.count {
            let mut clone = original.clone();
            clone.id = next_id;
            next_id += 1;

            if let Some(prefix) = &options.prepend_title {
                clone.title = format!("{} {}", prefix, original.title);
            }

            for (field, shifter) in shifters.iter_mut() {
                shifter.alter_field_value(original, &mut clone, field)?;
            }

            clones.push(clone);
        }
    }

    Ok(clones)
}

/// Convenience wrapper: clone a single record.
pub fn clone_record(original: &Record, options: &CloneOptions) -> Result<Vec<Record>> {
    clone_records(std::slice::from_ref(original), options)
}
