//! School timetable candidate generation.
//!
//! Lays out the school day, then produces ranked alternative timetables
//! for a set of classes, subjects and teachers. Users preview the
//! candidates and apply one to replace the live grid.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Period`, `Break`, `Requirement`,
//!   `SlotKey`, `AssignmentGrid`, `TimetableConfig`, `CandidateSchedule`
//! - **`timeline`**: Period layout from a day window, a period count and breaks
//! - **`validation`**: Input integrity checks (duplicate IDs, period order, references)
//! - **`generator`**: Randomized constructive placement, scoring and the
//!   top-K candidate pool, plus a background worker
//! - **`kpi`**: Candidate quality metrics for preview
//! - **`error`**: `TimetableError`
//!
//! # Example
//!
//! ```
//! use u_timetable::generator::{GeneratorConfig, TimetableGenerator};
//! use u_timetable::models::{Break, Requirement, TimeOfDay, TimetableConfig};
//! use u_timetable::timeline::DayLayout;
//!
//! let t = |s: &str| -> TimeOfDay { s.parse().unwrap() };
//! let periods = DayLayout::new(t("08:30"), t("15:00"), 7)
//!     .with_break(Break::new("lunch", "Lunch", t("12:00"), t("12:30")))
//!     .build_timeline()
//!     .unwrap();
//!
//! let config = TimetableConfig::new()
//!     .with_days(["Mon", "Tue", "Wed", "Thu", "Fri"])
//!     .with_periods(periods)
//!     .with_classes(["7A"])
//!     .with_teachers(["T1", "T2"])
//!     .with_requirement(Requirement::new("7A", "math", 5).with_teacher("T1"))
//!     .with_requirement(Requirement::new("7A", "eng", 4).with_teacher("T2"));
//!
//! let result = TimetableGenerator::new(GeneratorConfig::default().with_seed(1))
//!     .generate(&config)
//!     .unwrap();
//! assert!(!result.candidates.is_empty());
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent Research Directions in Automated Timetabling"

pub mod error;
pub mod generator;
pub mod kpi;
pub mod models;
pub mod timeline;
pub mod validation;

pub use error::TimetableError;
