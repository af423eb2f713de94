//! Candidate schedule model.

use serde::{Deserialize, Serialize};

use super::{AssignmentGrid, TimetableConfig};

/// Highest possible score; a schedule with nothing to penalize.
pub const SCORE_CEILING: u32 = 10_000;

/// One complete, scored, generated assignment grid.
///
/// Immutable once produced. The UI previews it and either applies it
/// (replacing the live grid) or discards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSchedule {
    /// Identifier, unique within one generation run.
    pub id: String,
    /// Score in `0..=SCORE_CEILING`; higher is better.
    pub score: u32,
    /// Lessons that could not be placed.
    pub unplaced: usize,
    /// Grid snapshot.
    pub grid: AssignmentGrid,
}

impl CandidateSchedule {
    /// Creates a candidate.
    pub fn new(id: impl Into<String>, score: u32, unplaced: usize, grid: AssignmentGrid) -> Self {
        Self {
            id: id.into(),
            score,
            unplaced,
            grid,
        }
    }

    /// Whether every required lesson was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced == 0
    }

    /// Replaces the live grid of `config` with this candidate's grid.
    pub fn apply_to(&self, config: &mut TimetableConfig) {
        config.current = self.grid.clone();
    }
}
