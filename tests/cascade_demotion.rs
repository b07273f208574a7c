use coursedag::curriculum::{Course, CourseKind, Term};
use coursedag::engine::{cascade_from, is_satisfied, settle_all, toggle};
use coursedag::graph::{CourseGraph, CourseState, StateStore};

fn course(name: &str, approved: &[&str], regularized: &[&str]) -> Course {
    Course {
        name: name.into(),
        year: 1,
        term: Term::Annual,
        kind: CourseKind::Annual,
        approval_prereqs: approved.iter().map(|s| s.to_string()).collect(),
        regular_prereqs: regularized.iter().map(|s| s.to_string()).collect(),
    }
}

fn setup(courses: Vec<Course>) -> (CourseGraph, StateStore) {
    let graph = CourseGraph::from_courses(courses);
    let mut store = StateStore::initialize(&graph);
    settle_all(&graph, &mut store);
    (graph, store)
}

fn approve(graph: &CourseGraph, store: &mut StateStore, name: &str) {
    toggle(graph, store, name).unwrap();
    toggle(graph, store, name).unwrap();
    assert_eq!(store.get(name).unwrap(), CourseState::Approved);
}

#[test]
fn revoking_a_prerequisite_relocks_untouched_dependents() {
    // Chain A -> B -> C, each requiring the previous approved.
    let (graph, mut store) = setup(vec![
        course("A", &[], &[]),
        course("B", &["A"], &[]),
        course("C", &["B"], &[]),
    ]);

    approve(&graph, &mut store, "A");
    approve(&graph, &mut store, "B");
    assert_eq!(store.get("C").unwrap(), CourseState::Available);

    // One backward toggle on B: approved -> available (direct result, not
    // a cascade side-effect)...
    let r = toggle(&graph, &mut store, "B").unwrap();
    assert!(r.accepted());
    assert_eq!(store.get("B").unwrap(), CourseState::Available);

    // ...and the cascade relocks C, which had not been started.
    assert_eq!(store.get("C").unwrap(), CourseState::Locked);
}

#[test]
fn started_dependents_are_demoted_to_available_never_below() {
    let (graph, mut store) = setup(vec![
        course("A", &[], &[]),
        course("B", &["A"], &[]),
    ]);

    approve(&graph, &mut store, "A");
    approve(&graph, &mut store, "B");

    // Revoke A. B loses its prerequisite but keeps eligibility standing:
    // demoted to available, not locked.
    toggle(&graph, &mut store, "A").unwrap();
    assert_eq!(store.get("A").unwrap(), CourseState::Available);
    assert_eq!(store.get("B").unwrap(), CourseState::Available);
}

#[test]
fn demotion_propagates_through_started_chains() {
    let (graph, mut store) = setup(vec![
        course("A", &[], &[]),
        course("B", &["A"], &[]),
        course("C", &["B"], &[]),
    ]);

    approve(&graph, &mut store, "A");
    approve(&graph, &mut store, "B");
    approve(&graph, &mut store, "C");

    // Revoking A demotes B (started) to available; B then no longer
    // satisfies C, which is demoted in the same pass.
    toggle(&graph, &mut store, "A").unwrap();
    assert_eq!(store.get("B").unwrap(), CourseState::Available);
    assert_eq!(store.get("C").unwrap(), CourseState::Available);
}

#[test]
fn settled_state_is_a_fixpoint() {
    let (graph, mut store) = setup(vec![
        course("A", &[], &[]),
        course("B", &["A"], &["A"]),
        course("C", &["A", "B"], &[]),
        course("D", &[], &["B", "C"]),
    ]);

    // Re-running the settle pass on an already settled store changes
    // nothing.
    assert!(settle_all(&graph, &mut store).is_empty());

    approve(&graph, &mut store, "A");
    approve(&graph, &mut store, "B");

    assert!(settle_all(&graph, &mut store).is_empty());
    for name in ["A", "B", "C", "D"] {
        assert!(cascade_from(&graph, &mut store, name).is_empty());
    }
}

#[test]
fn available_or_better_implies_satisfied_after_forward_toggles() {
    let (graph, mut store) = setup(vec![
        course("A", &[], &[]),
        course("B", &["A"], &[]),
        course("C", &[], &["B"]),
        course("D", &["A"], &["C"]),
    ]);

    approve(&graph, &mut store, "A");
    toggle(&graph, &mut store, "B").unwrap(); // regular
    toggle(&graph, &mut store, "C").unwrap(); // regular

    // No prerequisite has been revoked, so every course at available or
    // better must be satisfied right now.
    for course_ref in graph.courses() {
        let state = store.get(&course_ref.name).unwrap();
        if state != CourseState::Locked {
            assert!(
                is_satisfied(course_ref, &store),
                "course {} is {state} but not satisfied",
                course_ref.name
            );
        }
    }
}

#[test]
fn dangling_prerequisite_keeps_course_locked_forever() {
    let (graph, mut store) = setup(vec![
        course("A", &[], &[]),
        course("B", &["Ghost"], &[]),
    ]);

    assert_eq!(store.get("B").unwrap(), CourseState::Locked);

    approve(&graph, &mut store, "A");
    assert_eq!(store.get("B").unwrap(), CourseState::Locked);

    let r = toggle(&graph, &mut store, "B").unwrap();
    assert!(!r.accepted());
}
