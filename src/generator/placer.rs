//! Stochastic constructive placement.
//!
//! One attempt builds a full grid in a single greedy-random pass:
//!
//! 1. Start from the base grid: every teaching cell empty, locked cells
//!    holding their current value.
//! 2. Shuffle the lesson tasks (Fisher–Yates).
//! 3. For each task, collect every feasible (free cell, teacher, room)
//!    option for its class, trying teachers in a freshly shuffled order.
//! 4. Commit one option chosen uniformly at random, or count the task as
//!    unplaced when there is none.
//!
//! There is no backtracking. Diversity comes from running many attempts.

use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use tracing::warn;

use super::evaluator::{ConstraintEvaluator, Verdict};
use crate::models::{AssignmentGrid, LessonTask, SlotAssignment, SlotKey, TimetableConfig};

/// Result of one placement attempt.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    /// Final grid.
    pub grid: AssignmentGrid,
    /// Tasks that found no feasible option.
    pub unplaced: usize,
}

/// A feasible way to place the current task.
struct PlacementOption<'t> {
    key: SlotKey,
    teacher: &'t str,
    room: Option<String>,
}

/// Runs placement attempts against a fixed configuration.
#[derive(Debug, Clone)]
pub struct StochasticPlacer<'a> {
    config: &'a TimetableConfig,
    evaluator: ConstraintEvaluator<'a>,
    base: AssignmentGrid,
}

impl<'a> StochasticPlacer<'a> {
    /// Prepares the base grid for `config`.
    ///
    /// Locked keys that do not name a teaching cell are ignored.
    pub fn new(config: &'a TimetableConfig) -> Self {
        let mut base = AssignmentGrid::new();
        for key in config.slot_keys() {
            base.open_cell(key);
        }
        for key in &config.locked {
            if base.has_cell(key) {
                base.set(key.clone(), config.current.get(key).cloned());
            } else {
                warn!(
                    day = %key.day,
                    period = %key.period,
                    class = %key.class,
                    "Locked slot outside the grid, ignoring"
                );
            }
        }

        Self {
            config,
            evaluator: ConstraintEvaluator::new(&config.blocklist),
            base,
        }
    }

    /// The grid every attempt starts from.
    pub fn base_grid(&self) -> &AssignmentGrid {
        &self.base
    }

    /// Runs one attempt with a generator seeded from `seed`.
    pub fn run_seeded(&self, tasks: &[LessonTask], seed: u64) -> AttemptOutcome {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.run(tasks, &mut rng)
    }

    /// Runs one attempt using `rng` for every random choice.
    pub fn run<R: Rng + ?Sized>(&self, tasks: &[LessonTask], rng: &mut R) -> AttemptOutcome {
        let mut grid = self.base.clone();
        let mut unplaced = 0;

        let mut order: Vec<&LessonTask> = tasks.iter().collect();
        order.shuffle(rng);

        let mut teachers: Vec<&str> = Vec::new();
        for task in order {
            let mut options: Vec<PlacementOption<'_>> = Vec::new();

            for day in &self.config.days {
                for period in self.config.teaching_periods() {
                    let key = SlotKey::new(day, &period.id, &task.class_id);
                    if !grid.is_free(&key) || self.config.locked.contains(&key) {
                        continue;
                    }

                    teachers.clear();
                    teachers.extend(task.allowed_teachers.iter().map(String::as_str));
                    teachers.shuffle(rng);

                    for &teacher in &teachers {
                        let verdict = self.evaluator.evaluate(
                            &grid,
                            day,
                            &period.id,
                            teacher,
                            task.preferred_room.as_deref(),
                        );
                        if let Verdict::Feasible { room } = verdict {
                            options.push(PlacementOption {
                                key: key.clone(),
                                teacher,
                                room,
                            });
                        }
                    }
                }
            }

            match options.choose(rng) {
                Some(choice) => {
                    let assignment = SlotAssignment {
                        subject_id: task.subject_id.clone(),
                        teacher_id: choice.teacher.to_string(),
                        room_id: choice.room.clone(),
                    };
                    grid.place(choice.key.clone(), assignment);
                }
                None => unplaced += 1,
            }
        }

        AttemptOutcome { grid, unplaced }
    }
}
