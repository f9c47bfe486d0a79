//! # fieldclone
//!
//! Batch record cloning with date-increment field transforms.
//!
//! Cloning a record N times is rarely the whole job: a cloned event series
//! usually needs each copy's dates pushed further out than the last. This
//! crate pairs a small clone engine with DST-aware date shifting -- the first
//! clone of a record moves one configured increment, the second two, and so
//! on, spreading the batch across the calendar.
//!
//! ## Modules
//!
//! - [`record`] -- the cloneable record/field model
//! - [`interval`] -- increment units and calendar-aware interval arithmetic
//! - [`shifter`] -- per-field date shifting (calendar strings, epoch seconds)
//! - [`engine`] -- batch cloning with per-field shift configuration
//! - [`error`] -- error types
//!
//! ## Quick start
//!
//! ```rust
//! use fieldclone::{
//!     clone_records, CloneOptions, FieldShiftSpec, IncrementConfig, IncrementUnit, Record,
//! };
//!
//! let mut event = Record::new(1, "Orientation");
//! event.set_field("event_date", "2024-09-02");
//!
//! let options = CloneOptions {
//!     count: 2,
//!     shifts: vec![FieldShiftSpec::calendar(
//!         "event_date",
//!         IncrementConfig::new(1, IncrementUnit::Week).unwrap(),
//!     )],
//!     ..CloneOptions::new()
//! };
//!
//! let clones = clone_records(&[event], &options).unwrap();
//! assert_eq!(clones[0].field("event_date").unwrap()[0].value, "2024-09-09");
//! assert_eq!(clones[1].field("event_date").unwrap()[0].value, "2024-09-16");
//! ```

pub mod engine;
pub mod error;
pub mod interval;
pub mod record;
pub mod shifter;

pub use engine::{clone_record, clone_records, CloneOptions, FieldShiftSpec};
pub use error::CloneError;
pub use interval::{IncrementConfig, IncrementUnit};
pub use record::{FieldItem, Record, RecordId};
pub use shifter::{FieldShifter, ValueRepr, DEFAULT_TIMEZONE};
