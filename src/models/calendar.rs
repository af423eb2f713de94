//! Time-of-day and time window models.
//!
//! A school day is modelled on a minute grid. `TimeOfDay` counts minutes
//! since midnight and is written as `"HH:MM"` on the wire.
//!
//! # Intervals
//! All windows are half-open `[start, end)`, so two windows that touch
//! (one ends at 12:00, the next starts at 12:00) do not overlap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minutes in a day; `TimeOfDay` values are in `0..=MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time within a school day, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Creates a time from hours and minutes.
    ///
    /// Returns `None` for anything past 24:00.
    pub fn hm(hours: u32, minutes: u32) -> Option<Self> {
        if minutes >= 60 {
            return None;
        }
        let total = hours.checked_mul(60)?.checked_add(minutes)?;
        Self::from_minutes(total)
    }

    /// Creates a time from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// This time shifted forward; saturates at 24:00.
    pub fn plus_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes).min(MINUTES_PER_DAY))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Error returned when a `"HH:MM"` string cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid time of day '{0}', expected HH:MM")]
pub struct ParseTimeError(String);

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeError(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
        let hours: u32 = h.parse().map_err(|_| err())?;
        let minutes: u32 = m.parse().map_err(|_| err())?;
        Self::hm(hours, minutes).ok_or_else(err)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ParseTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// A time interval [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: TimeOfDay,
    /// Interval end (exclusive).
    pub end: TimeOfDay,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Length in minutes; zero for empty or inverted windows.
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Whether the window has positive length.
    #[inline]
    pub fn is_proper(&self) -> bool {
        self.start < self.end
    }

    /// Whether a time falls within this window.
    #[inline]
    pub fn contains(&self, time: TimeOfDay) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether `other` lies entirely within this window.
    pub fn encloses(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Removes `holes` from this window, returning the remaining pieces in order.
    ///
    /// Holes are expected sorted by start and non-overlapping.
    pub fn subtract(&self, holes: &[TimeWindow]) -> Vec<TimeWindow> {
        let mut pieces = Vec::new();
        let mut cursor = self.start;
        for hole in holes {
            if hole.start > cursor {
                pieces.push(TimeWindow::new(cursor, hole.start.min(self.end)));
            }
            cursor = cursor.max(hole.end);
        }
        if cursor < self.end {
            pieces.push(TimeWindow::new(cursor, self.end));
        }
        pieces.retain(TimeWindow::is_proper);
        pieces
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
