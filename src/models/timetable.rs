//! Timetable configuration: everything one generation run consumes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{AssignmentGrid, Period, Requirement, SlotKey};

/// Teacher unavailability: teacher id → blocked `(day, period)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blocklist {
    blocked: BTreeMap<String, BTreeSet<(String, String)>>,
}

impl Blocklist {
    /// Creates an empty blocklist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a teacher unavailable at `(day, period)`.
    pub fn block(
        &mut self,
        teacher_id: impl Into<String>,
        day: impl Into<String>,
        period: impl Into<String>,
    ) {
        self.blocked
            .entry(teacher_id.into())
            .or_default()
            .insert((day.into(), period.into()));
    }

    /// Builder form of [`block`](Self::block).
    pub fn with_block(
        mut self,
        teacher_id: impl Into<String>,
        day: impl Into<String>,
        period: impl Into<String>,
    ) -> Self {
        self.block(teacher_id, day, period);
        self
    }

    /// Whether the teacher is unavailable at `(day, period)`.
    pub fn is_blocked(&self, teacher_id: &str, day: &str, period: &str) -> bool {
        self.blocked
            .get(teacher_id)
            .is_some_and(|set| set.contains(&(day.to_string(), period.to_string())))
    }

    /// Teachers with at least one blocked slot.
    pub fn teachers(&self) -> impl Iterator<Item = &str> {
        self.blocked.keys().map(String::as_str)
    }
}

/// Full input of a generation run.
///
/// Built by the editing UI and copied into the generator; the generator
/// never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableConfig {
    /// Teaching days, in display order.
    pub days: Vec<String>,
    /// Daily timeline (instructional periods and breaks), in time order.
    pub periods: Vec<Period>,
    /// Classes to timetable.
    pub classes: Vec<String>,
    /// Known teachers; the default pool for requirements without a teacher list.
    pub teachers: Vec<String>,
    /// Subject-load requirements.
    pub requirements: Vec<Requirement>,
    /// Teacher unavailability.
    #[serde(default)]
    pub blocklist: Blocklist,
    /// Cells pinned by the user.
    #[serde(default)]
    pub locked: BTreeSet<SlotKey>,
    /// The live grid; supplies the values of locked cells.
    #[serde(default)]
    pub current: AssignmentGrid,
}

impl TimetableConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the teaching days.
    pub fn with_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days = days.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the daily timeline.
    pub fn with_periods(mut self, periods: Vec<Period>) -> Self {
        self.periods = periods;
        self
    }

    /// Sets the classes.
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the known teachers.
    pub fn with_teachers<I, S>(mut self, teachers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.teachers = teachers.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a requirement.
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Sets the blocklist.
    pub fn with_blocklist(mut self, blocklist: Blocklist) -> Self {
        self.blocklist = blocklist;
        self
    }

    /// Sets the live grid.
    pub fn with_current(mut self, current: AssignmentGrid) -> Self {
        self.current = current;
        self
    }

    /// Pins a cell.
    pub fn with_locked(mut self, key: SlotKey) -> Self {
        self.locked.insert(key);
        self
    }

    /// Instructional periods, in time order.
    pub fn teaching_periods(&self) -> impl Iterator<Item = &Period> {
        self.periods.iter().filter(|p| !p.is_break)
    }

    /// Every placeable cell: all days × teaching periods × classes.
    pub fn slot_keys(&self) -> impl Iterator<Item = SlotKey> + '_ {
        self.days.iter().flat_map(move |day| {
            self.teaching_periods().flat_map(move |period| {
                self.classes
                    .iter()
                    .map(move |class| SlotKey::new(day, &period.id, class))
            })
        })
    }
}
