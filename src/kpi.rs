//! Candidate quality metrics (KPIs).
//!
//! Summarizes a generated candidate for preview, next to its score.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placed | Lessons present in the grid |
//! | Unplaced | Lessons the attempt could not place |
//! | Adjacent pairs | Consecutive teaching periods sharing a subject (per class, day) |
//! | Rooms forfeited | Lessons whose requirement asks for a room but that got none |
//! | Teacher load | Lessons per teacher |
//! | Fill rate | Filled cells / all teaching cells |

use std::collections::{BTreeMap, HashSet};

use crate::generator::adjacent_same_subject_pairs;
use crate::models::{CandidateSchedule, TimetableConfig};

/// Candidate performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableKpi {
    /// Lessons placed in the grid, locked ones included.
    pub placed: usize,
    /// Lessons left unplaced.
    pub unplaced: usize,
    /// Same-subject pairs in consecutive teaching periods.
    pub adjacent_pairs: usize,
    /// Lessons that wanted a room but run without one.
    pub rooms_forfeited: usize,
    /// Lessons per teacher. Every known teacher appears, idle ones with 0.
    pub load_by_teacher: BTreeMap<String, usize>,
    /// Fraction of teaching cells holding a lesson (0.0..=1.0).
    pub fill_rate: f64,
}

impl TimetableKpi {
    /// Computes KPIs for a candidate against the configuration it was
    /// generated from.
    pub fn calculate(candidate: &CandidateSchedule, config: &TimetableConfig) -> Self {
        let wants_room: HashSet<(&str, &str)> = config
            .requirements
            .iter()
            .filter(|r| r.preferred_room.is_some())
            .map(|r| (r.class_id.as_str(), r.subject_id.as_str()))
            .collect();

        let mut load_by_teacher: BTreeMap<String, usize> =
            config.teachers.iter().map(|t| (t.clone(), 0)).collect();
        let mut placed = 0;
        let mut rooms_forfeited = 0;
        for (key, lesson) in candidate.grid.lessons() {
            placed += 1;
            *load_by_teacher.entry(lesson.teacher_id.clone()).or_insert(0) += 1;
            if lesson.room_id.is_none()
                && wants_room.contains(&(key.class.as_str(), lesson.subject_id.as_str()))
            {
                rooms_forfeited += 1;
            }
        }

        let cells = candidate.grid.cell_count();
        let fill_rate = if cells == 0 {
            0.0
        } else {
            placed as f64 / cells as f64
        };

        Self {
            placed,
            unplaced: candidate.unplaced,
            adjacent_pairs: adjacent_same_subject_pairs(&candidate.grid, config),
            rooms_forfeited,
            load_by_teacher,
            fill_rate,
        }
    }

    /// Highest lesson count of any single teacher.
    pub fn max_teacher_load(&self) -> usize {
        self.load_by_teacher.values().copied().max().unwrap_or(0)
    }

    /// Whether the candidate meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_unplaced: usize, min_fill_rate: f64) -> bool {
        self.unplaced <= max_unplaced && self.fill_rate >= min_fill_rate
    }
}
