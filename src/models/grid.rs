//! Assignment grid model.
//!
//! The grid maps every placement cell `(day, period, class)` to an optional
//! lesson. It is the mutable state threaded through one placement attempt,
//! and the snapshot stored in every candidate.
//!
//! Cells are kept in an ordered map so that iteration order, and therefore
//! the grid signature, is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Identity of one placement cell. Ordered by day, then period, then class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    /// Day identifier.
    pub day: String,
    /// Period identifier.
    pub period: String,
    /// Class identifier.
    pub class: String,
}

impl SlotKey {
    /// Creates a slot key.
    pub fn new(
        day: impl Into<String>,
        period: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            period: period.into(),
            class: class.into(),
        }
    }
}

/// A lesson placed in a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAssignment {
    /// Subject taught.
    pub subject_id: String,
    /// Teacher teaching it.
    pub teacher_id: String,
    /// Room, if one was secured.
    #[serde(default)]
    pub room_id: Option<String>,
}

impl SlotAssignment {
    /// Creates an assignment without a room.
    pub fn new(subject_id: impl Into<String>, teacher_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            teacher_id: teacher_id.into(),
            room_id: None,
        }
    }

    /// Sets the room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }
}

/// Wire form of one grid cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridEntry {
    #[serde(flatten)]
    key: SlotKey,
    assignment: Option<SlotAssignment>,
}

/// Mapping from slot key to lesson-or-empty.
///
/// At most one lesson occupies a key. Serialized as a list of entries
/// since JSON objects cannot use composite keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<GridEntry>", into = "Vec<GridEntry>")]
pub struct AssignmentGrid {
    cells: BTreeMap<SlotKey, Option<SlotAssignment>>,
}

impl From<Vec<GridEntry>> for AssignmentGrid {
    fn from(entries: Vec<GridEntry>) -> Self {
        Self {
            cells: entries.into_iter().map(|e| (e.key, e.assignment)).collect(),
        }
    }
}

impl From<AssignmentGrid> for Vec<GridEntry> {
    fn from(grid: AssignmentGrid) -> Self {
        grid.cells
            .into_iter()
            .map(|(key, assignment)| GridEntry { key, assignment })
            .collect()
    }
}

impl AssignmentGrid {
    /// Creates an empty grid with no cells.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty cell (no-op if the cell exists).
    pub fn open_cell(&mut self, key: SlotKey) {
        self.cells.entry(key).or_insert(None);
    }

    /// Places a lesson, replacing whatever the cell held.
    pub fn place(&mut self, key: SlotKey, assignment: SlotAssignment) {
        self.cells.insert(key, Some(assignment));
    }

    /// Sets a cell to an explicit value.
    pub fn set(&mut self, key: SlotKey, value: Option<SlotAssignment>) {
        self.cells.insert(key, value);
    }

    /// Builder form of [`place`](Self::place).
    pub fn with_lesson(mut self, key: SlotKey, assignment: SlotAssignment) -> Self {
        self.place(key, assignment);
        self
    }

    /// The lesson at a cell, if any.
    pub fn get(&self, key: &SlotKey) -> Option<&SlotAssignment> {
        self.cells.get(key).and_then(Option::as_ref)
    }

    /// Whether the grid has this cell (empty or not).
    pub fn has_cell(&self, key: &SlotKey) -> bool {
        self.cells.contains_key(key)
    }

    /// Whether the cell exists and holds no lesson.
    pub fn is_free(&self, key: &SlotKey) -> bool {
        matches!(self.cells.get(key), Some(None))
    }

    /// All lessons at `(day, period)`, across classes.
    pub fn lessons_at<'a>(
        &'a self,
        day: &'a str,
        period: &'a str,
    ) -> impl Iterator<Item = (&'a SlotKey, &'a SlotAssignment)> + 'a {
        self.cells
            .range(SlotKey::new(day, period, "")..)
            .take_while(move |(k, _)| k.day == day && k.period == period)
            .filter_map(|(k, v)| v.as_ref().map(|a| (k, a)))
    }

    /// Whether `teacher_id` already teaches at `(day, period)`.
    pub fn teacher_busy(&self, day: &str, period: &str, teacher_id: &str) -> bool {
        self.lessons_at(day, period)
            .any(|(_, a)| a.teacher_id == teacher_id)
    }

    /// Whether `room_id` is already used at `(day, period)`.
    pub fn room_busy(&self, day: &str, period: &str, room_id: &str) -> bool {
        self.lessons_at(day, period)
            .any(|(_, a)| a.room_id.as_deref() == Some(room_id))
    }

    /// Iterates all cells in key order.
    pub fn cells(&self) -> impl Iterator<Item = (&SlotKey, Option<&SlotAssignment>)> {
        self.cells.iter().map(|(k, v)| (k, v.as_ref()))
    }

    /// Iterates occupied cells in key order.
    pub fn lessons(&self) -> impl Iterator<Item = (&SlotKey, &SlotAssignment)> {
        self.cells
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|a| (k, a)))
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of occupied cells.
    pub fn lesson_count(&self) -> usize {
        self.cells.values().filter(|v| v.is_some()).count()
    }

    /// Canonical serialization of every cell, used to detect identical grids.
    pub fn signature(&self) -> String {
        let mut sig = String::with_capacity(self.cells.len() * 24);
        for (key, value) in &self.cells {
            let _ = write!(sig, "{}\u{1f}{}\u{1f}{}=", key.day, key.period, key.class);
            match value {
                Some(a) => {
                    let _ = write!(
                        sig,
                        "{}\u{1f}{}\u{1f}{}",
                        a.subject_id,
                        a.teacher_id,
                        a.room_id.as_deref().unwrap_or("")
                    );
                }
                None => sig.push('-'),
            }
            sig.push('\u{1e}');
        }
        sig
    }
}
