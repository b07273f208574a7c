// src/engine/cascade.rs

use std::collections::VecDeque;

use tracing::debug;

use crate::curriculum::model::Course;
use crate::graph::graph::CourseGraph;
use crate::graph::state::{CourseState, StateChange, StateStore};

/// Sole authority for "can this course progress".
///
/// True iff every regular-type prerequisite is at `Regular` or better and
/// every approval-type prerequisite is `Approved`. Empty prerequisite sets
/// are vacuously satisfied. A prerequisite name with no entry in the store
/// (a reference outside the program) is never satisfied.
pub fn is_satisfied(course: &Course, store: &StateStore) -> bool {
    let regular_ok = course
        .regular_prereqs
        .iter()
        .all(|dep| store.peek(dep).is_some_and(CourseState::satisfies_regular));

    let approval_ok = course
        .approval_prereqs
        .iter()
        .all(|dep| store.peek(dep).is_some_and(CourseState::satisfies_approval));

    regular_ok && approval_ok
}

/// Recompute the derived state of one course from its current state and its
/// prerequisites' states.
///
/// - `Locked`/`Available` flip between each other based on satisfaction.
/// - `Regular`/`Approved` are user-set and only ever *demoted*, to
///   `Available`, when satisfaction is lost. Never below, and never
///   auto-promoted: losing a prerequisite retracts downstream progress to
///   "eligible but not started".
fn derived_state(course: &Course, current: CourseState, store: &StateStore) -> CourseState {
    let satisfied = is_satisfied(course, store);

    match current {
        CourseState::Locked | CourseState::Available => {
            if satisfied {
                CourseState::Available
            } else {
                CourseState::Locked
            }
        }
        CourseState::Regular | CourseState::Approved => {
            if satisfied {
                current
            } else {
                CourseState::Available
            }
        }
    }
}

/// Propagate a state change at `seed` through the graph to a fixpoint.
///
/// Breadth-first over `dependents_of`; every course whose derived state
/// differs from its stored state is rewritten and re-enqueued so its own
/// dependents get reprocessed. Terminates because each course can only move
/// through a small lattice of states per triggering change (the curriculum
/// is validated acyclic at load).
///
/// Returns the changes in the order they were applied. The seed course's
/// own change (if the caller made one) is not included.
pub fn cascade_from(graph: &CourseGraph, store: &mut StateStore, seed: &str) -> Vec<StateChange> {
    let mut queue: VecDeque<String> = VecDeque::new();
    queue.push_back(seed.to_string());
    run_to_fixpoint(graph, store, queue)
}

/// Settle the whole program: run the fixpoint pass seeded with every course.
///
/// Used once per program load, right after the seed initialization of the
/// store. This assigns `Available` to courses whose prerequisites are
/// already satisfied at init without hand-computing those states.
pub fn settle_all(graph: &CourseGraph, store: &mut StateStore) -> Vec<StateChange> {
    let queue: VecDeque<String> = graph.names().map(str::to_string).collect();
    run_to_fixpoint(graph, store, queue)
}

fn run_to_fixpoint(
    graph: &CourseGraph,
    store: &mut StateStore,
    mut queue: VecDeque<String>,
) -> Vec<StateChange> {
    let mut changes = Vec::new();

    while let Some(current) = queue.pop_front() {
        for dependent in graph.dependents_of(&current) {
            let Some(course) = graph.get(dependent) else {
                continue;
            };
            let Some(old) = store.peek(dependent) else {
                continue;
            };

            let new = derived_state(course, old, store);
            if new != old {
                debug!(course = %dependent, from = %old, to = %new, "cascade state change");
                store.write(dependent, new);
                changes.push(StateChange {
                    course: dependent.clone(),
                    from: old,
                    to: new,
                });
                queue.push_back(dependent.clone());
            }
        }
    }

    changes
}
