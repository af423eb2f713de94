//! Time model builder.
//!
//! Turns a school-day window, a period count and a set of breaks into a
//! gap-free sequence of instructional periods.
//!
//! # Algorithm
//!
//! 1. Validate breaks: proper, inside the day, pairwise disjoint.
//! 2. Subtract breaks from the day to get teaching intervals.
//! 3. Require at least `count × MIN_PERIOD_MINUTES` teaching minutes.
//! 4. Allocate periods to intervals proportionally (largest remainder).
//! 5. Move periods out of intervals whose average falls below the minimum.
//! 6. Split each interval evenly; earlier periods absorb leftover minutes.
//!
//! Every failure is reported with a reason and yields no partial result.

use serde::{Deserialize, Serialize};

use crate::error::TimetableError;
use crate::models::{Break, Period, TimeOfDay, TimeWindow};

/// Shortest allowed instructional period.
pub const MIN_PERIOD_MINUTES: u32 = 20;

/// Declarative description of a school day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    /// First minute of teaching time.
    pub day_start: TimeOfDay,
    /// End of the school day (exclusive).
    pub day_end: TimeOfDay,
    /// Number of instructional periods wanted.
    pub period_count: u32,
    /// Breaks and non-instructional blocks.
    #[serde(default)]
    pub breaks: Vec<Break>,
}

impl DayLayout {
    /// Creates a layout without breaks.
    pub fn new(day_start: TimeOfDay, day_end: TimeOfDay, period_count: u32) -> Self {
        Self {
            day_start,
            day_end,
            period_count,
            breaks: Vec::new(),
        }
    }

    /// Adds a break.
    pub fn with_break(mut self, brk: Break) -> Self {
        self.breaks.push(brk);
        self
    }

    /// Builds the instructional periods.
    ///
    /// Periods are labelled `Period N` with ids `P{N}`, never flagged as breaks.
    pub fn build_periods(&self) -> Result<Vec<Period>, TimetableError> {
        if self.period_count == 0 {
            return Err(TimetableError::InvalidPeriodCount);
        }
        let day = TimeWindow::new(self.day_start, self.day_end);
        if !day.is_proper() {
            return Err(TimetableError::InvalidDayWindow {
                start: self.day_start.to_string(),
                end: self.day_end.to_string(),
            });
        }

        let breaks = self.sorted_breaks(&day)?;
        let holes: Vec<TimeWindow> = breaks.iter().map(|b| b.window()).collect();
        let intervals = day.subtract(&holes);

        let available: u32 = intervals.iter().map(TimeWindow::duration_minutes).sum();
        let required = self.period_count.saturating_mul(MIN_PERIOD_MINUTES);
        if available < required {
            return Err(TimetableError::InsufficientMinutes {
                available,
                required,
            });
        }

        let lengths: Vec<u32> = intervals.iter().map(TimeWindow::duration_minutes).collect();
        let mut counts = allocate_largest_remainder(&lengths, self.period_count);
        rebalance(&lengths, &mut counts)?;

        let mut periods = Vec::with_capacity(self.period_count as usize);
        for (interval, &count) in intervals.iter().zip(&counts) {
            for window in split_evenly(interval, count) {
                let n = periods.len() + 1;
                periods.push(
                    Period::new(format!("P{n}"), window.start, window.end)
                        .with_label(format!("Period {n}")),
                );
            }
        }
        Ok(periods)
    }

    /// Builds the periods and merges the breaks into one sorted timeline.
    pub fn build_timeline(&self) -> Result<Vec<Period>, TimetableError> {
        let mut timeline = self.build_periods()?;
        timeline.extend(self.breaks.iter().map(Break::to_period));
        timeline.sort_by_key(|p| p.start);
        Ok(timeline)
    }

    /// Validates breaks and returns them sorted by start.
    fn sorted_breaks(&self, day: &TimeWindow) -> Result<Vec<&Break>, TimetableError> {
        for b in &self.breaks {
            if !b.window().is_proper() {
                let reason = format!("must start before it ends ({}-{})", b.start, b.end);
                return Err(invalid_break(b, reason));
            }
            if !day.encloses(&b.window()) {
                let reason = format!("({}) lies outside the school day ({day})", b.window());
                return Err(invalid_break(b, reason));
            }
        }

        let mut sorted: Vec<&Break> = self.breaks.iter().collect();
        sorted.sort_by_key(|b| b.start);
        for pair in sorted.windows(2) {
            if pair[0].window().overlaps(&pair[1].window()) {
                return Err(invalid_break(pair[1], format!("overlaps break '{}'", pair[0].name)));
            }
        }
        Ok(sorted)
    }
}

fn invalid_break(b: &Break, reason: String) -> TimetableError {
    TimetableError::InvalidBreak {
        name: b.name.clone(),
        reason,
    }
}

/// Distributes `total` periods over intervals in proportion to their length.
///
/// Floors the exact quotas, then hands the leftover periods to the largest
/// fractional remainders (earlier interval wins ties).
fn allocate_largest_remainder(lengths: &[u32], total: u32) -> Vec<u32> {
    let sum: u64 = lengths.iter().map(|&l| u64::from(l)).sum();
    if sum == 0 {
        return vec![0; lengths.len()];
    }

    let mut counts = Vec::with_capacity(lengths.len());
    let mut remainders = Vec::with_capacity(lengths.len());
    for (i, &len) in lengths.iter().enumerate() {
        let scaled = u64::from(total) * u64::from(len);
        counts.push((scaled / sum) as u32);
        remainders.push((i, scaled % sum));
    }

    let assigned: u32 = counts.iter().sum();
    // Stable sort keeps earlier intervals first among equal remainders.
    remainders.sort_by(|a, b| b.1.cmp(&a.1));
    for &(i, _) in remainders.iter().take((total - assigned) as usize) {
        counts[i] += 1;
    }
    counts
}

/// Whether `len` minutes can hold `count` periods of at least the minimum.
#[inline]
fn fits(len: u32, count: u32) -> bool {
    len >= count.saturating_mul(MIN_PERIOD_MINUTES)
}

/// Moves periods away from intervals too short for their allocation.
fn rebalance(lengths: &[u32], counts: &mut [u32]) -> Result<(), TimetableError> {
    while let Some(over) = (0..counts.len()).find(|&i| !fits(lengths[i], counts[i])) {
        // The receiver ending with the longest average period absorbs best.
        let receiver = (0..counts.len())
            .filter(|&j| j != over && fits(lengths[j], counts[j] + 1))
            .max_by(|&a, &b| {
                let avg_a = u64::from(lengths[a]) * u64::from(counts[b] + 1);
                let avg_b = u64::from(lengths[b]) * u64::from(counts[a] + 1);
                // Prefer the earlier interval on equal averages.
                avg_a.cmp(&avg_b).then(b.cmp(&a))
            })
            .ok_or(TimetableError::NoValidSplit)?;

        counts[over] -= 1;
        counts[receiver] += 1;
    }
    Ok(())
}

/// Splits a window into `count` consecutive periods whose lengths differ by
/// at most one minute, longer ones first.
fn split_evenly(window: &TimeWindow, count: u32) -> Vec<TimeWindow> {
    if count == 0 {
        return Vec::new();
    }
    let len = window.duration_minutes();
    let base = len / count;
    let extra = len % count;

    let mut cursor = window.start;
    (0..count)
        .map(|i| {
            let minutes = base + u32::from(i < extra);
            let end = cursor.plus_minutes(minutes);
            let w = TimeWindow::new(cursor, end);
            cursor = end;
            w
        })
        .collect()
}
