//! Input validation for timetable configurations.
//!
//! Checks structural integrity before any placement attempt. Detects:
//! - Duplicate IDs (days, periods, classes, teachers)
//! - Malformed periods (start not before end)
//! - Unsorted or overlapping periods
//! - Requirements naming unknown classes or teachers
//! - Blocklist entries for unknown teachers
//!
//! All problems are collected; nothing stops at the first error.

use std::collections::HashSet;

use crate::models::TimetableConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A period does not end after it starts.
    InvalidPeriod,
    /// Periods are out of order or overlap.
    OverlappingPeriods,
    /// A requirement references a class that doesn't exist.
    UnknownClass,
    /// A requirement or blocklist references a teacher that doesn't exist.
    UnknownTeacher,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a timetable configuration.
///
/// Checks:
/// 1. No duplicate day, period, class or teacher IDs
/// 2. Every period starts before it ends
/// 3. Periods are in time order and do not overlap
/// 4. Requirements reference existing classes and teachers
/// 5. Blocklist entries reference existing teachers
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &TimetableConfig) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique("day", config.days.iter().map(String::as_str), &mut errors);
    check_unique(
        "period",
        config.periods.iter().map(|p| p.id.as_str()),
        &mut errors,
    );
    let class_ids = check_unique("class", config.classes.iter().map(String::as_str), &mut errors);
    let teacher_ids = check_unique(
        "teacher",
        config.teachers.iter().map(String::as_str),
        &mut errors,
    );

    // Period shape and ordering
    for p in &config.periods {
        if !p.window().is_proper() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPeriod,
                format!("Period '{}' must start before it ends ({}-{})", p.id, p.start, p.end),
            ));
        }
    }
    for pair in config.periods.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.start < prev.end {
            errors.push(ValidationError::new(
                ValidationErrorKind::OverlappingPeriods,
                format!(
                    "Period '{}' ({}) starts before period '{}' ends ({})",
                    next.id, next.start, prev.id, prev.end
                ),
            ));
        }
    }

    // Requirement references
    for req in &config.requirements {
        if !class_ids.contains(req.class_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownClass,
                format!(
                    "Requirement for '{}' references unknown class '{}'",
                    req.subject_id, req.class_id
                ),
            ));
        }
        for teacher in &req.allowed_teachers {
            if !teacher_ids.contains(teacher.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTeacher,
                    format!(
                        "Requirement '{}/{}' references unknown teacher '{}'",
                        req.class_id, req.subject_id, teacher
                    ),
                ));
            }
        }
    }

    for teacher in config.blocklist.teachers() {
        if !teacher_ids.contains(teacher) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTeacher,
                format!("Blocklist references unknown teacher '{teacher}'"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Collects IDs, reporting duplicates.
fn check_unique<'a>(
    what: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {what} ID: {id}"),
            ));
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Blocklist, Period, Requirement, TimeOfDay};

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn sample_config() -> TimetableConfig {
        TimetableConfig::new()
            .with_days(["Mon", "Tue"])
            .with_periods(vec![
                Period::new("P1", t("08:00"), t("08:50")),
                Period::new("recess", t("08:50"), t("09:10")).as_break(),
                Period::new("P2", t("09:10"), t("10:00")),
            ])
            .with_classes(["7A", "7B"])
            .with_teachers(["T1", "T2"])
            .with_requirement(Requirement::new("7A", "math", 3).with_teacher("T1"))
            .with_requirement(Requirement::new("7B", "eng", 2))
            .with_blocklist(Blocklist::new().with_block("T2", "Mon", "P1"))
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&sample_config()).is_ok());
    }

    #[test]
    fn test_duplicate_class_id() {
        let cfg = sample_config().with_classes(["7A", "7A", "7B"]);
        let errors = validate_config(&cfg).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("class")));
    }

    #[test]
    fn test_inverted_period() {
        let mut cfg = sample_config();
        cfg.periods[2] = Period::new("P2", t("10:00"), t("09:10"));
        let errors = validate_config(&cfg).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidPeriod));
    }

    #[test]
    fn test_overlapping_periods() {
        let mut cfg = sample_config();
        cfg.periods[2] = Period::new("P2", t("09:00"), t("10:00"));
        let errors = validate_config(&cfg).unwrap_err();
        assert!(errors.iter().any(|e| {
            e.kind == ValidationErrorKind::OverlappingPeriods && e.message.contains("P2")
        }));
    }

    #[test]
    fn test_unknown_references() {
        let cfg = sample_config()
            .with_requirement(Requirement::new("9Z", "art", 1))
            .with_requirement(Requirement::new("7A", "pe", 1).with_teacher("T9"));
        let errors = validate_config(&cfg).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownClass && e.message.contains("9Z")));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownTeacher && e.message.contains("T9")));
    }

    #[test]
    fn test_blocklist_unknown_teacher() {
        let cfg = sample_config().with_blocklist(Blocklist::new().with_block("ghost", "Mon", "P1"));
        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnknownTeacher);
    }

    #[test]
    fn test_multiple_errors() {
        let cfg = sample_config()
            .with_teachers(["T1", "T1"])
            .with_requirement(Requirement::new("9Z", "art", 1));
        let errors = validate_config(&cfg).unwrap_err();
        // duplicate T1, unknown class 9Z, and T2 is no longer known
        assert!(errors.len() >= 3);
    }
}
