//! Crate error type.
//!
//! Every variant is a recoverable user-input problem; `Display` gives a
//! message fit to show as-is.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised before or around a generation run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimetableError {
    #[error("day start {start} must be before day end {end}")]
    InvalidDayWindow { start: String, end: String },
    #[error("period count must be at least 1")]
    InvalidPeriodCount,
    #[error("break '{name}' {reason}")]
    InvalidBreak { name: String, reason: String },
    #[error(
        "not enough teaching time: {available} minutes available, {required} needed ({} short)",
        .required - .available
    )]
    InsufficientMinutes { available: u32, required: u32 },
    #[error("no valid period split")]
    NoValidSplit,
    #[error("invalid timetable configuration: {}", join_messages(.0))]
    InvalidConfig(Vec<ValidationError>),
    #[error("invalid generator settings: {0}")]
    InvalidSettings(String),
    #[error("generation superseded by a newer request")]
    Superseded,
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
