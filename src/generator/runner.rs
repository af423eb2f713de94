//! Generation run: many placement attempts feeding one candidate pool.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::GeneratorConfig;
use super::expander::expand_requirements;
use super::placer::StochasticPlacer;
use super::scoring::{score_grid, CandidatePool, Offer};
use crate::error::TimetableError;
use crate::models::{CandidateSchedule, TimetableConfig};
use crate::validation::validate_config;

/// Input of one generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Timetable snapshot.
    pub timetable: TimetableConfig,
    /// Tunables.
    #[serde(default)]
    pub settings: GeneratorConfig,
}

impl GenerationRequest {
    /// Creates a request.
    pub fn new(timetable: TimetableConfig, settings: GeneratorConfig) -> Self {
        Self {
            timetable,
            settings,
        }
    }
}

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Candidates, best first. May be empty.
    pub candidates: Vec<CandidateSchedule>,
    /// Attempts run.
    pub attempts: usize,
    /// Attempts discarded as duplicates of an accepted grid.
    pub duplicates: usize,
}

impl GenerationResult {
    /// The best candidate, if any.
    pub fn best(&self) -> Option<&CandidateSchedule> {
        self.candidates.first()
    }

    /// User-facing one-liner.
    pub fn summary(&self) -> String {
        format!("{} candidates generated", self.candidates.len())
    }
}

/// Runs the randomized generator.
///
/// A pure function of its inputs: nothing outside the returned result is
/// touched, and a fixed seed reproduces the result exactly.
///
/// # Example
///
/// ```
/// use u_timetable::generator::{GeneratorConfig, TimetableGenerator};
/// use u_timetable::models::{Period, Requirement, TimetableConfig};
///
/// let config = TimetableConfig::new()
///     .with_days(["Mon", "Tue"])
///     .with_periods(vec![
///         Period::new("P1", "08:00".parse().unwrap(), "08:50".parse().unwrap()),
///         Period::new("P2", "08:50".parse().unwrap(), "09:40".parse().unwrap()),
///     ])
///     .with_classes(["7A"])
///     .with_teachers(["T1"])
///     .with_requirement(Requirement::new("7A", "math", 3));
///
/// let generator = TimetableGenerator::new(GeneratorConfig::default().with_seed(7));
/// let result = generator.generate(&config).unwrap();
/// assert!(result.best().unwrap().is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableGenerator {
    settings: GeneratorConfig,
}

impl TimetableGenerator {
    /// Creates a generator with the given settings.
    pub fn new(settings: GeneratorConfig) -> Self {
        Self { settings }
    }

    /// The generator's settings.
    pub fn settings(&self) -> &GeneratorConfig {
        &self.settings
    }

    /// Runs `attempts` placement attempts and returns the best `keep`
    /// distinct candidates.
    ///
    /// Fails only on invalid settings or configuration, before any attempt.
    pub fn generate(&self, config: &TimetableConfig) -> Result<GenerationResult, TimetableError> {
        self.settings.validate()?;
        validate_config(config).map_err(TimetableError::InvalidConfig)?;

        let tasks = expand_requirements(&config.requirements, &config.teachers);
        let placer = StochasticPlacer::new(config);
        let mut pool = CandidatePool::new(self.settings.keep);
        let base_seed = self.settings.base_seed();

        info!(
            tasks = tasks.len(),
            cells = placer.base_grid().cell_count(),
            attempts = self.settings.attempts,
            keep = self.settings.keep,
            base_seed,
            "Starting timetable generation"
        );

        let mut duplicates = 0;
        for attempt in 0..self.settings.attempts {
            let seed = GeneratorConfig::attempt_seed(base_seed, attempt);
            let outcome = placer.run_seeded(&tasks, seed);
            let score = score_grid(&outcome.grid, outcome.unplaced, config);
            let unplaced = outcome.unplaced;
            let id = format!("candidate-{}", attempt + 1);
            let candidate = CandidateSchedule::new(id, score, unplaced, outcome.grid);

            match pool.offer(candidate) {
                Offer::Duplicate => {
                    duplicates += 1;
                    debug!(attempt, "Duplicate grid discarded");
                }
                offer => debug!(attempt, score, unplaced, ?offer, "Attempt scored"),
            }
        }

        let result = GenerationResult {
            candidates: pool.into_candidates(),
            attempts: self.settings.attempts,
            duplicates,
        };
        info!(
            candidates = result.candidates.len(),
            duplicates,
            best_score = result.best().map(|c| c.score),
            "{}",
            result.summary()
        );
        Ok(result)
    }
}

/// Runs a generation request.
pub fn generate(request: &GenerationRequest) -> Result<GenerationResult, TimetableError> {
    TimetableGenerator::new(request.settings.clone()).generate(&request.timetable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AssignmentGrid, Blocklist, Break, Period, Requirement, SlotAssignment, SlotKey, TimeOfDay,
        SCORE_CEILING,
    };
    use crate::timeline::DayLayout;
    use std::collections::HashSet;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn school() -> TimetableConfig {
        let periods = DayLayout::new(t("08:30"), t("15:00"), 7)
            .with_break(Break::new("lunch", "Lunch", t("12:00"), t("12:30")))
            .build_timeline()
            .unwrap();
        TimetableConfig::new()
            .with_days(["Mon", "Tue", "Wed", "Thu", "Fri"])
            .with_periods(periods)
            .with_classes(["7A", "7B"])
            .with_teachers(["T1", "T2", "T3", "T4"])
            .with_requirement(Requirement::new("7A", "math", 5).with_teacher("T1"))
            .with_requirement(Requirement::new("7B", "math", 5).with_teacher("T1"))
            .with_requirement(
                Requirement::new("7A", "eng", 4)
                    .with_teacher("T2")
                    .with_teacher("T3"),
            )
            .with_requirement(
                Requirement::new("7B", "eng", 4)
                    .with_teacher("T2")
                    .with_teacher("T3"),
            )
            .with_requirement(Requirement::new("7A", "sci", 3).with_room("LAB"))
            .with_requirement(Requirement::new("7B", "sci", 3).with_room("LAB"))
            .with_requirement(Requirement::new("7A", "pe", 2).with_teacher("T4"))
            .with_blocklist(
                Blocklist::new()
                    .with_block("T1", "Mon", "P1")
                    .with_block("T1", "Fri", "P7"),
            )
    }

    fn settings() -> GeneratorConfig {
        GeneratorConfig::default()
            .with_keep(4)
            .with_attempts(40)
            .with_seed(2024)
    }

    #[test]
    fn test_generates_ranked_distinct_candidates() {
        let cfg = school();
        let result = TimetableGenerator::new(settings()).generate(&cfg).unwrap();

        assert_eq!(result.attempts, 40);
        assert!(!result.candidates.is_empty());
        assert!(result.candidates.len() <= 4);
        for pair in result.candidates.windows(2) {
            assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].unplaced <= pair[1].unplaced)
            );
        }
        let sigs: HashSet<String> = result.candidates.iter().map(|c| c.grid.signature()).collect();
        assert_eq!(sigs.len(), result.candidates.len());
        assert!(result.candidates.iter().all(|c| c.score <= SCORE_CEILING));
    }

    #[test]
    fn test_no_teacher_double_booking_in_any_candidate() {
        let cfg = school();
        let result = TimetableGenerator::new(settings()).generate(&cfg).unwrap();
        for cand in &result.candidates {
            let mut seen = HashSet::new();
            for (key, lesson) in cand.grid.lessons() {
                assert!(seen.insert((&key.day, &key.period, &lesson.teacher_id)));
                assert!(!cfg.blocklist.is_blocked(&lesson.teacher_id, &key.day, &key.period));
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_result() {
        let cfg = school();
        let a = TimetableGenerator::new(settings()).generate(&cfg).unwrap();
        let b = TimetableGenerator::new(settings()).generate(&cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_locked_slots_survive_every_candidate() {
        let key = SlotKey::new("Wed", "P3", "7A");
        let pinned = SlotAssignment::new("drama", "T4").with_room("HALL");
        let cfg = school()
            .with_current(AssignmentGrid::new().with_lesson(key.clone(), pinned.clone()))
            .with_locked(key.clone());

        for run in 0..2 {
            let result = TimetableGenerator::new(settings().with_seed(run))
                .generate(&cfg)
                .unwrap();
            for cand in &result.candidates {
                assert_eq!(cand.grid.get(&key), Some(&pinned));
            }
        }
    }

    #[test]
    fn test_fully_blocked_teacher() {
        let days = ["Mon", "Tue"];
        let periods = DayLayout::new(t("08:00"), t("11:00"), 3).build_periods().unwrap();
        let mut blocks = Blocklist::new();
        for day in days {
            for p in &periods {
                blocks.block("T1", day, &p.id);
            }
        }
        let cfg = TimetableConfig::new()
            .with_days(days)
            .with_periods(periods)
            .with_classes(["7A"])
            .with_teachers(["T1"])
            .with_requirement(Requirement::new("7A", "math", 2).with_teacher("T1"))
            .with_blocklist(blocks);

        let result = TimetableGenerator::new(settings()).generate(&cfg).unwrap();
        assert!(!result.candidates.is_empty());
        for cand in &result.candidates {
            assert!(cand.unplaced >= 2);
            assert!(cand.score <= SCORE_CEILING - 2_000);
        }
        // Every attempt yields the same empty grid.
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.duplicates, 39);
        assert_eq!(result.summary(), "1 candidates generated");
    }

    #[test]
    fn test_forced_adjacency_penalized() {
        // Two periods, two math lessons: they always sit side by side.
        let cfg = TimetableConfig::new()
            .with_days(["Mon"])
            .with_periods(vec![
                Period::new("P1", t("08:00"), t("08:50")),
                Period::new("P2", t("08:50"), t("09:40")),
            ])
            .with_classes(["7A"])
            .with_teachers(["T1", "T2"])
            .with_requirement(Requirement::new("7A", "math", 1).with_teacher("T1"))
            .with_requirement(Requirement::new("7A", "math", 1).with_teacher("T2"));

        let result = TimetableGenerator::new(settings()).generate(&cfg).unwrap();
        for cand in &result.candidates {
            assert_eq!(cand.unplaced, 0);
            assert_eq!(cand.score, SCORE_CEILING - 6);
        }
    }

    #[test]
    fn test_invalid_config_aborts() {
        let cfg = school().with_requirement(Requirement::new("9Z", "art", 1));
        let err = TimetableGenerator::new(settings()).generate(&cfg).unwrap_err();
        assert!(matches!(err, TimetableError::InvalidConfig(_)));
        assert!(err.to_string().contains("9Z"));
    }

    #[test]
    fn test_invalid_settings_abort() {
        let err = TimetableGenerator::new(settings().with_keep(0))
            .generate(&school())
            .unwrap_err();
        assert!(matches!(err, TimetableError::InvalidSettings(_)));
    }

    #[test]
    fn test_request_over_json() {
        let request = GenerationRequest::new(school(), settings());
        let json = serde_json::to_string(&request).unwrap();
        let back: GenerationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(generate(&back).unwrap(), generate(&request).unwrap());
    }
}
