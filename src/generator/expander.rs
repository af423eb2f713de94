//! Requirement expansion.
//!
//! Flattens per-class subject loads into one task per required lesson.

use crate::models::{LessonTask, Requirement};

/// Expands requirements into lesson tasks.
///
/// A requirement with `periods_per_cycle = n` yields `n` tasks. An empty
/// teacher set becomes `known_teachers`. The result is stably sorted by
/// ascending teacher count, so the most constrained lessons come first;
/// placement attempts shuffle on top of this baseline.
pub fn expand_requirements(
    requirements: &[Requirement],
    known_teachers: &[String],
) -> Vec<LessonTask> {
    let mut tasks: Vec<LessonTask> = requirements
        .iter()
        .flat_map(|req| {
            let teachers: Vec<String> = if req.allowed_teachers.is_empty() {
                known_teachers.to_vec()
            } else {
                req.allowed_teachers.iter().cloned().collect()
            };
            let task = LessonTask {
                class_id: req.class_id.clone(),
                subject_id: req.subject_id.clone(),
                preferred_room: req.preferred_room.clone(),
                allowed_teachers: teachers,
            };
            (0..req.periods_per_cycle).map(move |_| task.clone())
        })
        .collect();

    tasks.sort_by_key(LessonTask::flexibility);
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teachers() -> Vec<String> {
        vec!["T1".into(), "T2".into(), "T3".into()]
    }

    #[test]
    fn test_one_task_per_period() {
        let reqs = vec![
            Requirement::new("7A", "math", 3),
            Requirement::new("7A", "eng", 2).with_teacher("T2"),
            Requirement::new("7B", "art", 0),
        ];
        let tasks = expand_requirements(&reqs, &teachers());
        let expected: u32 = reqs.iter().map(|r| r.periods_per_cycle).sum();
        assert_eq!(tasks.len(), expected as usize);
        assert_eq!(tasks.iter().filter(|t| t.subject_id == "math").count(), 3);
        assert!(tasks.iter().all(|t| t.subject_id != "art"));
    }

    #[test]
    fn test_empty_teacher_set_means_everyone() {
        let tasks = expand_requirements(&[Requirement::new("7A", "math", 1)], &teachers());
        assert_eq!(tasks[0].allowed_teachers, teachers());
    }

    #[test]
    fn test_most_constrained_first() {
        let reqs = vec![
            Requirement::new("7A", "math", 1),
            Requirement::new("7A", "sci", 1).with_teacher("T1").with_teacher("T3"),
            Requirement::new("7B", "eng", 2).with_teacher("T2").with_room("R4"),
        ];
        let tasks = expand_requirements(&reqs, &teachers());
        let order: Vec<&str> = tasks.iter().map(|t| t.subject_id.as_str()).collect();
        assert_eq!(order, vec!["eng", "eng", "sci", "math"]);
        assert_eq!(tasks[0].preferred_room.as_deref(), Some("R4"));
    }

    #[test]
    fn test_sort_is_stable() {
        let reqs = vec![
            Requirement::new("7A", "math", 1).with_teacher("T1"),
            Requirement::new("7B", "eng", 1).with_teacher("T2"),
            Requirement::new("7C", "sci", 1).with_teacher("T3"),
        ];
        let tasks = expand_requirements(&reqs, &teachers());
        let classes: Vec<&str> = tasks.iter().map(|t| t.class_id.as_str()).collect();
        assert_eq!(classes, vec!["7A", "7B", "7C"]);
    }
}
