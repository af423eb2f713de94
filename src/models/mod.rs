//! Timetabling domain models.
//!
//! Provides the data types a generation run consumes and produces.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | Generic scheduling |
//! |-------------|--------|--------------------|
//! | Requirement | Subject load of a class | Demand |
//! | LessonTask | One lesson | Job |
//! | SlotKey | Day × period × class | Time slot × lane |
//! | Blocklist | Teacher availability | Resource calendar |
//! | CandidateSchedule | Draft timetable | Solution |

mod calendar;
mod candidate;
mod grid;
mod period;
mod requirement;
mod timetable;

pub use calendar::{ParseTimeError, TimeOfDay, TimeWindow, MINUTES_PER_DAY};
pub use candidate::{CandidateSchedule, SCORE_CEILING};
pub use grid::{AssignmentGrid, SlotAssignment, SlotKey};
pub use period::{Break, BreakKind, Period};
pub use requirement::{LessonTask, Requirement};
pub use timetable::{Blocklist, TimetableConfig};
