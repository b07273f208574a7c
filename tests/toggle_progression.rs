use coursedag::curriculum::{Course, CourseKind, Term};
use coursedag::engine::{settle_all, toggle, ToggleResponse};
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

#[test]
fn dependent_unlocks_only_after_prerequisite_is_approved() {
    // Scenario: Math2 requires Math1 approved.
    let (graph, mut store) = setup(vec![
        course("Math1", &[], &[]),
        course("Math2", &["Math1"], &[]),
    ]);

    assert_eq!(store.get("Math1").unwrap(), CourseState::Available);
    assert_eq!(store.get("Math2").unwrap(), CourseState::Locked);

    // First toggle: Math1 regular, which does not satisfy an approval-type
    // prerequisite.
    let r = toggle(&graph, &mut store, "Math1").unwrap();
    assert!(r.accepted());
    assert_eq!(store.get("Math1").unwrap(), CourseState::Regular);
    assert_eq!(store.get("Math2").unwrap(), CourseState::Locked);

    // Second toggle: Math1 approved, Math2 unlocks.
    let r = toggle(&graph, &mut store, "Math1").unwrap();
    match r {
        ToggleResponse::Applied { to, cascade, .. } => {
            assert_eq!(to, CourseState::Approved);
            assert_eq!(cascade.len(), 1);
            assert_eq!(cascade[0].course, "Math2");
            assert_eq!(cascade[0].to, CourseState::Available);
        }
        other => panic!("expected applied toggle, got {other:?}"),
    }
    assert_eq!(store.get("Math2").unwrap(), CourseState::Available);
}

#[test]
fn toggles_are_single_step_only() {
    let (graph, mut store) = setup(vec![
        course("Math1", &[], &[]),
        course("Math2", &["Math1"], &[]),
    ]);

    // A locked course never advances, however often it is toggled.
    for _ in 0..3 {
        let r = toggle(&graph, &mut store, "Math2").unwrap();
        assert!(!r.accepted());
        assert_eq!(store.get("Math2").unwrap(), CourseState::Locked);
    }

    // An available course advances exactly one step per toggle.
    toggle(&graph, &mut store, "Math1").unwrap();
    assert_eq!(store.get("Math1").unwrap(), CourseState::Regular);
    toggle(&graph, &mut store, "Math1").unwrap();
    assert_eq!(store.get("Math1").unwrap(), CourseState::Approved);

    // Toggling an approved course is a manual revert to available.
    toggle(&graph, &mut store, "Math1").unwrap();
    assert_eq!(store.get("Math1").unwrap(), CourseState::Available);
}

#[test]
fn regular_prerequisite_is_satisfied_below_approved() {
    // Scenario: Lab requires Intro regularized (not approved).
    let (graph, mut store) = setup(vec![
        course("Intro", &[], &[]),
        course("Lab", &[], &["Intro"]),
    ]);

    assert_eq!(store.get("Lab").unwrap(), CourseState::Locked);

    // Intro regular is enough for a regular-type prerequisite.
    toggle(&graph, &mut store, "Intro").unwrap();
    assert_eq!(store.get("Intro").unwrap(), CourseState::Regular);
    assert_eq!(store.get("Lab").unwrap(), CourseState::Available);
}

#[test]
fn courses_with_satisfied_prereqs_settle_available_on_load() {
    // A prerequisite-free chain head should leave only itself available;
    // settle_all must not promote anything else.
    let (_graph, store) = setup(vec![
        course("A", &[], &[]),
        course("B", &["A"], &[]),
        course("C", &["B"], &[]),
    ]);

    assert_eq!(store.get("A").unwrap(), CourseState::Available);
    assert_eq!(store.get("B").unwrap(), CourseState::Locked);
    assert_eq!(store.get("C").unwrap(), CourseState::Locked);
}

#[test]
fn unknown_course_is_a_loud_error() {
    let (graph, mut store) = setup(vec![course("Math1", &[], &[])]);

    let err = toggle(&graph, &mut store, "Nope").unwrap_err();
    assert_eq!(err.0, "Nope");

    assert!(store.get("Nope").is_err());
}
