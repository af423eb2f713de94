//! Generator tunables.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::TimetableError;

/// Default number of candidates kept.
pub const DEFAULT_KEEP: usize = 5;

/// Default attempts budget.
pub const DEFAULT_ATTEMPTS: usize = 200;

/// Per-invocation settings of a generation run.
///
/// # Example
///
/// ```
/// use u_timetable::generator::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_keep(3)
///     .with_attempts(50)
///     .with_seed(42);
/// assert_eq!(config.keep, 3);
/// assert_eq!(config.base_seed(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// How many top candidates to retain (K).
    pub keep: usize,
    /// How many randomized attempts to run.
    pub attempts: usize,
    /// Fixed base seed. `None` = seed from the clock.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            keep: DEFAULT_KEEP,
            attempts: DEFAULT_ATTEMPTS,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Sets the keep-count.
    pub fn with_keep(mut self, keep: usize) -> Self {
        self.keep = keep;
        self
    }

    /// Sets the attempts budget.
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Fixes the base seed, making runs reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that keep-count and attempts are usable.
    pub fn validate(&self) -> Result<(), TimetableError> {
        if self.keep == 0 {
            return Err(TimetableError::InvalidSettings(
                "keep-count must be at least 1".into(),
            ));
        }
        if self.attempts == 0 {
            return Err(TimetableError::InvalidSettings(
                "attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The configured seed, or the current time in nanoseconds.
    pub fn base_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        })
    }

    /// Seed of one attempt: base seed plus attempt index.
    #[inline]
    pub fn attempt_seed(base: u64, attempt: usize) -> u64 {
        base.wrapping_add(attempt as u64)
    }
}
