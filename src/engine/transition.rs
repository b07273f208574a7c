// src/engine/transition.rs

use tracing::{debug, info};

use crate::engine::cascade::{cascade_from, is_satisfied};
use crate::engine::diagnostic::{self, Diagnostic};
use crate::errors::UnknownCourseError;
use crate::graph::graph::CourseGraph;
use crate::graph::state::{CourseState, StateChange, StateStore};

/// Outcome of a user toggle on one course.
///
/// A rejection is a normal result, not an error: it is how the engine tells
/// the presentation layer to show the missing-prerequisite explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleResponse {
    /// The transition was applied. `cascade` lists every *other* course
    /// whose state changed as a consequence, in application order.
    Applied {
        from: CourseState,
        to: CourseState,
        cascade: Vec<StateChange>,
    },
    /// The course is locked, or eligible but with unmet prerequisites.
    /// State is unchanged.
    Rejected { diagnostic: Diagnostic },
}

impl ToggleResponse {
    /// Whether the toggle mutated state.
    pub fn accepted(&self) -> bool {
        matches!(self, ToggleResponse::Applied { .. })
    }
}

/// Apply one user toggle to `name`, mutating the store and cascading on
/// success.
///
/// Transition table (current state → result):
/// - `Locked`: no-op, rejected with a diagnostic.
/// - `Available`: advances to `Regular` iff prerequisites are satisfied,
///   otherwise rejected with a diagnostic.
/// - `Regular`: advances to `Approved`, unconditionally.
/// - `Approved`: reverts to `Available`, unconditionally (manual undo).
///
/// The eligibility gate is only checked when *entering* `Regular`: backing
/// off or completing an already-eligible course needs no re-validation.
///
/// Not reentrant; callers serialize toggles (see the session layer).
pub fn toggle(
    graph: &CourseGraph,
    store: &mut StateStore,
    name: &str,
) -> Result<ToggleResponse, UnknownCourseError> {
    let course = graph
        .get(name)
        .ok_or_else(|| UnknownCourseError(name.to_string()))?;
    let current = store.get(name)?;

    let next = match current {
        CourseState::Locked => {
            let diagnostic = diagnostic::resolve(course, store);
            debug!(course = %name, ?diagnostic, "toggle on locked course; rejecting");
            return Ok(ToggleResponse::Rejected { diagnostic });
        }
        CourseState::Available => {
            if !is_satisfied(course, store) {
                let diagnostic = diagnostic::resolve(course, store);
                debug!(course = %name, ?diagnostic, "eligibility gate failed; rejecting");
                return Ok(ToggleResponse::Rejected { diagnostic });
            }
            CourseState::Regular
        }
        CourseState::Regular => CourseState::Approved,
        CourseState::Approved => CourseState::Available,
    };

    store.set(name, next)?;
    info!(course = %name, from = %current, to = %next, "toggle applied");

    let cascade = cascade_from(graph, store, name);

    Ok(ToggleResponse::Applied {
        from: current,
        to: next,
        cascade,
    })
}
