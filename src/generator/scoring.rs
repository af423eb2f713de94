//! Candidate scoring and the top-K candidate pool.
//!
//! # Score
//!
//! `10000 − 1000 × unplaced − 6 × adjacent same-subject pairs`, floored at 0.
//! Unplaced lessons dominate the ranking; consecutive repeats of a subject
//! within one class and day break ties between complete schedules.
//!
//! # Pool
//!
//! Keeps the best K candidates, ordered by score (descending) then unplaced
//! count (ascending). Grids already accepted once, even if evicted since,
//! are rejected as duplicates.

use std::collections::HashSet;

use crate::models::{AssignmentGrid, CandidateSchedule, SlotKey, TimetableConfig, SCORE_CEILING};

/// Penalty per lesson left unplaced.
pub const UNPLACED_PENALTY: u32 = 1_000;

/// Penalty per pair of consecutive periods with the same subject.
pub const ADJACENCY_PENALTY: u32 = 6;

/// Counts consecutive teaching periods, per class and day, that share a subject.
pub fn adjacent_same_subject_pairs(grid: &AssignmentGrid, config: &TimetableConfig) -> usize {
    let periods: Vec<&str> = config.teaching_periods().map(|p| p.id.as_str()).collect();
    let mut pairs = 0;
    for day in &config.days {
        for class in &config.classes {
            let subjects: Vec<Option<&str>> = periods
                .iter()
                .map(|period| {
                    grid.get(&SlotKey::new(day, *period, class))
                        .map(|a| a.subject_id.as_str())
                })
                .collect();
            pairs += subjects
                .windows(2)
                .filter(|w| w[0].is_some() && w[0] == w[1])
                .count();
        }
    }
    pairs
}

/// Scores a finished attempt.
pub fn score(unplaced: usize, adjacent_pairs: usize) -> u32 {
    let penalty = (unplaced as u64)
        .saturating_mul(u64::from(UNPLACED_PENALTY))
        .saturating_add((adjacent_pairs as u64).saturating_mul(u64::from(ADJACENCY_PENALTY)));
    u64::from(SCORE_CEILING).saturating_sub(penalty) as u32
}

/// Scores a grid against its configuration.
pub fn score_grid(grid: &AssignmentGrid, unplaced: usize, config: &TimetableConfig) -> u32 {
    score(unplaced, adjacent_same_subject_pairs(grid, config))
}

/// What happened to a candidate offered to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// Kept in the pool.
    Accepted,
    /// Same grid as a previously accepted candidate; discarded.
    Duplicate,
    /// Ranked below every kept candidate in a full pool; discarded.
    Outranked,
}

/// Bounded, deduplicated, ranked set of candidates.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    keep: usize,
    entries: Vec<CandidateSchedule>,
    signatures: HashSet<String>,
}

impl CandidatePool {
    /// Creates a pool that retains at most `keep` candidates.
    pub fn new(keep: usize) -> Self {
        Self {
            keep,
            entries: Vec::with_capacity(keep + 1),
            signatures: HashSet::new(),
        }
    }

    /// Offers a candidate.
    ///
    /// Inserts it, re-ranks, and evicts the lowest-ranked entry when the
    /// pool exceeds its keep-count.
    pub fn offer(&mut self, candidate: CandidateSchedule) -> Offer {
        if !self.signatures.insert(candidate.grid.signature()) {
            return Offer::Duplicate;
        }

        let id = candidate.id.clone();
        self.entries.push(candidate);
        // Stable: earlier candidates win exact ties.
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.unplaced.cmp(&b.unplaced)));

        if self.entries.len() > self.keep {
            if let Some(evicted) = self.entries.pop() {
                if evicted.id == id {
                    return Offer::Outranked;
                }
            }
        }
        Offer::Accepted
    }

    /// Candidates, best first.
    pub fn candidates(&self) -> &[CandidateSchedule] {
        &self.entries
    }

    /// Consumes the pool, returning candidates best first.
    pub fn into_candidates(self) -> Vec<CandidateSchedule> {
        self.entries
    }

    /// Number of kept candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The best candidate, if any.
    pub fn best(&self) -> Option<&CandidateSchedule> {
        self.entries.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Period, SlotAssignment, TimeOfDay};

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn config() -> TimetableConfig {
        TimetableConfig::new()
            .with_days(["Mon"])
            .with_classes(["7A", "7B"])
            .with_periods(vec![
                Period::new("P1", t("08:00"), t("08:50")),
                Period::new("P2", t("08:50"), t("09:40")),
                Period::new("lunch", t("09:40"), t("10:20")).as_break(),
                Period::new("P3", t("10:20"), t("11:10")),
            ])
    }

    fn lesson(subject: &str) -> SlotAssignment {
        SlotAssignment::new(subject, "T1")
    }

    fn grid_with(cells: &[(&str, &str, &str)]) -> AssignmentGrid {
        let mut g = AssignmentGrid::new();
        for &(period, class, subject) in cells {
            g.place(SlotKey::new("Mon", period, class), lesson(subject));
        }
        g
    }

    fn candidate(id: &str, score: u32, unplaced: usize, marker: &str) -> CandidateSchedule {
        CandidateSchedule::new(id, score, unplaced, grid_with(&[("P1", "7A", marker)]))
    }

    #[test]
    fn test_score_formula() {
        assert_eq!(score(0, 0), SCORE_CEILING);
        assert_eq!(score(2, 0), 8_000);
        assert_eq!(score(0, 3), 9_982);
        assert_eq!(score(1, 1), 8_994);
        assert_eq!(score(11, 0), 0); // floored
        assert_eq!(score(usize::MAX / 2, usize::MAX / 2), 0);
    }

    #[test]
    fn test_adjacency_counts_consecutive_teaching_periods() {
        let cfg = config();
        // P1 and P2 math: one pair. P2 and P3 are consecutive teaching
        // periods (lunch is skipped), so math at P3 adds another.
        let g = grid_with(&[("P1", "7A", "math"), ("P2", "7A", "math"), ("P3", "7A", "math")]);
        assert_eq!(adjacent_same_subject_pairs(&g, &cfg), 2);

        let g2 = grid_with(&[("P1", "7A", "math"), ("P2", "7B", "math"), ("P3", "7A", "math")]);
        assert_eq!(adjacent_same_subject_pairs(&g2, &cfg), 0);
    }

    #[test]
    fn test_adjacent_placement_costs_six() {
        let cfg = config();
        let adjacent = grid_with(&[
            ("P1", "7A", "math"),
            ("P2", "7A", "math"),
            ("P3", "7A", "eng"),
        ]);
        let apart = grid_with(&[
            ("P1", "7A", "math"),
            ("P2", "7A", "eng"),
            ("P3", "7A", "math"),
        ]);
        let a = score_grid(&adjacent, 0, &cfg);
        let b = score_grid(&apart, 0, &cfg);
        assert_eq!(b - a, ADJACENCY_PENALTY);
    }

    #[test]
    fn test_equal_patterns_score_equal() {
        let cfg = config();
        let a = grid_with(&[("P1", "7A", "math"), ("P2", "7A", "math")]);
        let b = grid_with(&[("P2", "7B", "eng"), ("P3", "7B", "eng")]);
        assert_eq!(score_grid(&a, 1, &cfg), score_grid(&b, 1, &cfg));
    }

    #[test]
    fn test_pool_orders_by_score_then_unplaced() {
        let mut pool = CandidatePool::new(5);
        pool.offer(candidate("a", 9_000, 1, "a"));
        pool.offer(candidate("b", 9_500, 0, "b"));
        pool.offer(candidate("c", 9_000, 0, "c"));
        let ids: Vec<&str> = pool.candidates().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(pool.best().unwrap().id, "b");
    }

    #[test]
    fn test_pool_evicts_lowest() {
        let mut pool = CandidatePool::new(2);
        assert_eq!(pool.offer(candidate("a", 8_000, 2, "a")), Offer::Accepted);
        assert_eq!(pool.offer(candidate("b", 9_000, 1, "b")), Offer::Accepted);
        assert_eq!(pool.offer(candidate("c", 10_000, 0, "c")), Offer::Accepted);
        assert_eq!(pool.offer(candidate("d", 7_000, 3, "d")), Offer::Outranked);
        let ids: Vec<&str> = pool.candidates().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_pool_rejects_duplicate_grids() {
        let mut pool = CandidatePool::new(3);
        assert_eq!(pool.offer(candidate("a", 9_000, 0, "same")), Offer::Accepted);
        assert_eq!(pool.offer(candidate("b", 9_990, 0, "same")), Offer::Duplicate);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.best().unwrap().id, "a");
    }

    #[test]
    fn test_evicted_signature_stays_known() {
        let mut pool = CandidatePool::new(1);
        pool.offer(candidate("a", 5_000, 5, "x"));
        pool.offer(candidate("b", 9_000, 1, "y")); // evicts a
        assert_eq!(pool.offer(candidate("c", 5_000, 5, "x")), Offer::Duplicate);
        assert_eq!(pool.into_candidates().len(), 1);
    }
}
