//! Randomized candidate generation.
//!
//! Produces up to K distinct, ranked candidate timetables from one
//! configuration snapshot.
//!
//! # Algorithm
//!
//! 1. Validate the configuration and settings.
//! 2. Expand requirements into one lesson task per required period,
//!    most-constrained first.
//! 3. Run `attempts` independent stochastic constructive passes, each seeded
//!    from `base + attempt` so a fixed base seed replays the whole run.
//! 4. Score each grid (`10000 − 1000 × unplaced − 6 × adjacent pairs`) and
//!    offer it to a bounded pool that rejects duplicate grids.
//!
//! Teacher clashes and blocklisted slots are hard constraints; a busy room
//! only costs the lesson its preferred room.
//!
//! # Reference
//!
//! Schaerf (1999), "A Survey of Automated Timetabling", Sec. 3

mod config;
mod evaluator;
mod expander;
mod placer;
mod runner;
mod scoring;
mod worker;

pub use config::{GeneratorConfig, DEFAULT_ATTEMPTS, DEFAULT_KEEP};
pub use evaluator::{ConstraintEvaluator, Verdict};
pub use expander::expand_requirements;
pub use placer::{AttemptOutcome, StochasticPlacer};
pub use runner::{generate, GenerationRequest, GenerationResult, TimetableGenerator};
pub use scoring::{
    adjacent_same_subject_pairs, score, score_grid, CandidatePool, Offer, ADJACENCY_PENALTY,
    UNPLACED_PENALTY,
};
pub use worker::{GenerationWorker, PendingGeneration};
