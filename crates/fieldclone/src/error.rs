//! Error types for fieldclone operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloneError {
    #[error("Invalid date value: {0}")]
    InvalidDate(String),

    #[error("Invalid epoch timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid increment unit: {0}")]
    InvalidUnit(String),

    #[error("Increment amount out of range (1-12): {0}")]
    InvalidIncrement(u32),

    #[error("Invalid field shift spec (expected FIELD=AMOUNT:UNIT): {0}")]
    InvalidShiftSpec(String),

    #[error("Date arithmetic overflow: {0}")]
    Overflow(String),
}

pub type Result<T> = std::result::Result<T, CloneError>;
