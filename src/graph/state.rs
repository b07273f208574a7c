// src/graph/state.rs

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::warn;

use crate::errors::UnknownCourseError;
use crate::graph::graph::CourseGraph;

/// Per-session state of a course.
///
/// The four variants form a progress order but not a linear machine: user
/// toggles move `Available → Regular → Approved → Available`, while the
/// cascade only ever moves courses between `Locked` and `Available` (in
/// both directions) and demotes `Regular`/`Approved` to `Available` when a
/// prerequisite is revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseState {
    /// Prerequisites not satisfied; not interactive for advancement.
    Locked,
    /// All prerequisites satisfied; eligible to start.
    Available,
    /// In progress / partially completed. Satisfies *regular* prerequisites
    /// of other courses but not *approval* ones.
    Regular,
    /// Fully completed. Satisfies both prerequisite kinds.
    Approved,
}

impl CourseState {
    /// Whether this state satisfies a regular-type prerequisite.
    pub fn satisfies_regular(self) -> bool {
        matches!(self, CourseState::Regular | CourseState::Approved)
    }

    /// Whether this state satisfies an approval-type prerequisite.
    pub fn satisfies_approval(self) -> bool {
        matches!(self, CourseState::Approved)
    }

}

impl fmt::Display for CourseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CourseState::Locked => "locked",
            CourseState::Available => "available",
            CourseState::Regular => "regular",
            CourseState::Approved => "approved",
        };
        write!(f, "{s}")
    }
}

/// One observed state change, as reported to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    pub course: String,
    pub from: CourseState,
    pub to: CourseState,
}

/// Single source of truth for the current [`CourseState`] of every course
/// in the active program.
///
/// Holds exactly one entry per course in the graph it was initialized from.
/// No prerequisite checking happens at this layer; that is the transition
/// controller's and cascade engine's job.
#[derive(Debug, Clone)]
pub struct StateStore {
    states: HashMap<String, CourseState>,
}

impl StateStore {
    /// Seed state for a freshly loaded program: prerequisite-free courses
    /// start `Available`, everything else `Locked`.
    ///
    /// This is only a seed; the caller runs a settle-all cascade pass
    /// immediately afterwards so courses whose prerequisites happen to be
    /// satisfied at init get their derived state.
    pub fn initialize(graph: &CourseGraph) -> Self {
        let states = graph
            .courses()
            .map(|course| {
                let state = if course.is_prereq_free() {
                    CourseState::Available
                } else {
                    CourseState::Locked
                };
                (course.name.clone(), state)
            })
            .collect();

        Self { states }
    }

    /// Current state of a course; unknown names are a caller bug.
    pub fn get(&self, name: &str) -> Result<CourseState, UnknownCourseError> {
        self.peek(name)
            .ok_or_else(|| UnknownCourseError(name.to_string()))
    }

    /// Overwrite a course's state; unknown names are a caller bug.
    pub fn set(&mut self, name: &str, state: CourseState) -> Result<(), UnknownCourseError> {
        match self.states.get_mut(name) {
            Some(slot) => {
                *slot = state;
                Ok(())
            }
            None => Err(UnknownCourseError(name.to_string())),
        }
    }

    /// Read-only copy for rendering, ordered by course name.
    pub fn snapshot(&self) -> BTreeMap<String, CourseState> {
        self.states
            .iter()
            .map(|(name, state)| (name.clone(), *state))
            .collect()
    }

    /// Non-failing lookup used by the satisfaction predicate: a dangling
    /// prerequisite reference has no entry and is simply never satisfied.
    pub(crate) fn peek(&self, name: &str) -> Option<CourseState> {
        self.states.get(name).copied()
    }

    /// Write used by the cascade, which only visits names sourced from the
    /// graph. An unknown name here indicates a graph/store mismatch.
    pub(crate) fn write(&mut self, name: &str, state: CourseState) {
        match self.states.get_mut(name) {
            Some(slot) => *slot = state,
            None => warn!(course = %name, "state write for course missing from store; ignoring"),
        }
    }
}
