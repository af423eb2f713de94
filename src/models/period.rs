//! Period and break models.
//!
//! A day is a sequence of periods. Instructional periods are generated by
//! the time model builder; breaks are declared by the user and merged into
//! the same sequence with `is_break = true`.

use serde::{Deserialize, Serialize};

use super::{TimeOfDay, TimeWindow};

/// One slot of the daily timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    /// Unique period identifier.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Start time (inclusive).
    pub start: TimeOfDay,
    /// End time (exclusive).
    pub end: TimeOfDay,
    /// Breaks never receive lessons.
    pub is_break: bool,
}

impl Period {
    /// Creates an instructional period.
    pub fn new(id: impl Into<String>, start: TimeOfDay, end: TimeOfDay) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            start,
            end,
            is_break: false,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Marks this period as a break.
    pub fn as_break(mut self) -> Self {
        self.is_break = true;
        self
    }

    /// The period's time window.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Length in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.window().duration_minutes()
    }
}

/// Break classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakKind {
    /// Recess or lunch.
    #[default]
    Break,
    /// Assemblies, registration and other non-teaching blocks.
    NonInstructional,
}

/// A user-declared interval with no lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Break {
    /// Unique break identifier.
    pub id: String,
    /// Display name ("Lunch").
    pub name: String,
    /// Classification.
    #[serde(default)]
    pub kind: BreakKind,
    /// Start time (inclusive).
    pub start: TimeOfDay,
    /// End time (exclusive).
    pub end: TimeOfDay,
}

impl Break {
    /// Creates a break of kind [`BreakKind::Break`].
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: BreakKind::Break,
            start,
            end,
        }
    }

    /// Sets the break kind.
    pub fn with_kind(mut self, kind: BreakKind) -> Self {
        self.kind = kind;
        self
    }

    /// The break's time window.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// This break as a timeline entry.
    pub fn to_period(&self) -> Period {
        Period::new(&self.id, self.start, self.end)
            .with_label(&self.name)
            .as_break()
    }
}
