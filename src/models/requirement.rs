//! Subject-load requirements and the lesson tasks derived from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How many periods of a subject a class needs per cycle.
///
/// Created and edited by the requirements editor; read-only to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Class receiving the lessons.
    pub class_id: String,
    /// Subject taught.
    pub subject_id: String,
    /// Number of lessons required per cycle.
    pub periods_per_cycle: u32,
    /// Teachers allowed to teach it. Empty = any known teacher.
    #[serde(default)]
    pub allowed_teachers: BTreeSet<String>,
    /// Room to use when free.
    #[serde(default)]
    pub preferred_room: Option<String>,
}

impl Requirement {
    /// Creates a requirement with no teacher restriction and no room.
    pub fn new(
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        periods_per_cycle: u32,
    ) -> Self {
        Self {
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            periods_per_cycle,
            allowed_teachers: BTreeSet::new(),
            preferred_room: None,
        }
    }

    /// Adds an allowed teacher.
    pub fn with_teacher(mut self, teacher_id: impl Into<String>) -> Self {
        self.allowed_teachers.insert(teacher_id.into());
        self
    }

    /// Sets the preferred room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.preferred_room = Some(room_id.into());
        self
    }
}

/// One lesson to place. Built fresh for every generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonTask {
    /// Class receiving the lesson.
    pub class_id: String,
    /// Subject taught.
    pub subject_id: String,
    /// Room to use when free.
    pub preferred_room: Option<String>,
    /// Candidate teachers, never empty unless no teachers are known.
    pub allowed_teachers: Vec<String>,
}

impl LessonTask {
    /// Number of candidate teachers.
    #[inline]
    pub fn flexibility(&self) -> usize {
        self.allowed_teachers.len()
    }
}
