// src/engine/diagnostic.rs

use crate::curriculum::model::Course;
use crate::graph::state::{CourseState, StateStore};

/// Explanation attached to a rejected toggle: which direct prerequisites of
/// the triggering course are still unmet, split by kind.
///
/// Ephemeral by design; the presentation layer holds it for a display
/// window and drops it. It never mutates the state store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The course the student tried to advance.
    pub course: String,
    /// Approval-type prerequisites not currently `Approved`.
    pub missing_approval: Vec<String>,
    /// Regular-type prerequisites not currently `Regular` or `Approved`.
    pub missing_regular: Vec<String>,
}

/// Compute the direct unmet-prerequisite lists for `course`.
///
/// Direct only: no walk beyond the course's own prerequisite sets.
pub fn resolve(course: &Course, store: &StateStore) -> Diagnostic {
    let missing_approval = course
        .approval_prereqs
        .iter()
        .filter(|dep| !store.peek(dep).is_some_and(CourseState::satisfies_approval))
        .cloned()
        .collect();

    let missing_regular = course
        .regular_prereqs
        .iter()
        .filter(|dep| !store.peek(dep).is_some_and(CourseState::satisfies_regular))
        .cloned()
        .collect();

    Diagnostic {
        course: course.name.clone(),
        missing_approval,
        missing_regular,
    }
}
