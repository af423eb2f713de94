//! Placement feasibility checks.
//!
//! # Rules (in order)
//!
//! 1. **Teacher blocked**: the teacher is unavailable at `(day, period)`.
//! 2. **Teacher busy**: the teacher already teaches another class then.
//! 3. **Room busy**: the proposed room is taken then. This never rejects;
//!    the lesson goes ahead without a room.
//!
//! Teacher clashes are hard, room clashes only cost the preferred room.

use crate::models::{AssignmentGrid, Blocklist};

/// Outcome of checking one (day, period, teacher, room) combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Teacher is on the blocklist for this slot.
    TeacherUnavailable,
    /// Teacher is already assigned at this slot.
    TeacherBusy,
    /// Placement allowed, with the room it gets (`None` if forfeited or not requested).
    Feasible { room: Option<String> },
}

impl Verdict {
    /// Whether the placement may go ahead.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Verdict::Feasible { .. })
    }
}

/// Checks candidate placements against a partial grid.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintEvaluator<'a> {
    blocklist: &'a Blocklist,
}

impl<'a> ConstraintEvaluator<'a> {
    /// Creates an evaluator over a teacher blocklist.
    pub fn new(blocklist: &'a Blocklist) -> Self {
        Self { blocklist }
    }

    /// Decides whether `teacher_id` (with optional `room_id`) can take
    /// `(day, period)` given what is already in `grid`.
    pub fn evaluate(
        &self,
        grid: &AssignmentGrid,
        day: &str,
        period: &str,
        teacher_id: &str,
        room_id: Option<&str>,
    ) -> Verdict {
        if self.blocklist.is_blocked(teacher_id, day, period) {
            return Verdict::TeacherUnavailable;
        }
        if grid.teacher_busy(day, period, teacher_id) {
            return Verdict::TeacherBusy;
        }
        let room = room_id
            .filter(|room| !grid.room_busy(day, period, room))
            .map(str::to_string);
        Verdict::Feasible { room }
    }
}
