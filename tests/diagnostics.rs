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

fn expect_rejected(r: ToggleResponse) -> coursedag::engine::Diagnostic {
    match r {
        ToggleResponse::Rejected { diagnostic } => diagnostic,
        other => panic!("expected rejected toggle, got {other:?}"),
    }
}

#[test]
fn locked_toggle_names_the_missing_approval_prerequisite() {
    // Scenario: Math2 toggled while Math1 is only available.
    let (graph, mut store) = setup(vec![
        course("Math1", &[], &[]),
        course("Math2", &["Math1"], &[]),
    ]);

    let diagnostic = expect_rejected(toggle(&graph, &mut store, "Math2").unwrap());
    assert_eq!(diagnostic.course, "Math2");
    assert_eq!(diagnostic.missing_approval, vec!["Math1".to_string()]);
    assert!(diagnostic.missing_regular.is_empty());

    assert_eq!(store.get("Math2").unwrap(), CourseState::Locked);
}

#[test]
fn diagnostic_splits_missing_prerequisites_by_kind() {
    let (graph, mut store) = setup(vec![
        course("Alg", &[], &[]),
        course("Prog", &[], &[]),
        course("Db", &["Alg"], &["Prog"]),
    ]);

    let diagnostic = expect_rejected(toggle(&graph, &mut store, "Db").unwrap());
    assert_eq!(diagnostic.missing_approval, vec!["Alg".to_string()]);
    assert_eq!(diagnostic.missing_regular, vec!["Prog".to_string()]);

    // A regular-kind prerequisite at regular is no longer missing.
    toggle(&graph, &mut store, "Prog").unwrap();
    let diagnostic = expect_rejected(toggle(&graph, &mut store, "Db").unwrap());
    assert_eq!(diagnostic.missing_approval, vec!["Alg".to_string()]);
    assert!(diagnostic.missing_regular.is_empty());
}

#[test]
fn diagnostic_reports_direct_prerequisites_only() {
    // C is blocked on B, which is itself blocked on A. The diagnostic for C
    // names B, not the root cause A.
    let (graph, mut store) = setup(vec![
        course("A", &[], &[]),
        course("B", &["A"], &[]),
        course("C", &["B"], &[]),
    ]);

    let diagnostic = expect_rejected(toggle(&graph, &mut store, "C").unwrap());
    assert_eq!(diagnostic.missing_approval, vec!["B".to_string()]);
}

#[test]
fn satisfied_prerequisites_are_absent_from_the_diagnostic() {
    let (graph, mut store) = setup(vec![
        course("A", &[], &[]),
        course("B", &[], &[]),
        course("C", &["A", "B"], &[]),
    ]);

    // Approve A only.
    toggle(&graph, &mut store, "A").unwrap();
    toggle(&graph, &mut store, "A").unwrap();

    let diagnostic = expect_rejected(toggle(&graph, &mut store, "C").unwrap());
    assert_eq!(diagnostic.missing_approval, vec!["B".to_string()]);
}

#[test]
fn rejection_never_mutates_state() {
    let (graph, mut store) = setup(vec![
        course("A", &[], &[]),
        course("B", &["A"], &[]),
    ]);

    let before = store.snapshot();
    expect_rejected(toggle(&graph, &mut store, "B").unwrap());
    assert_eq!(store.snapshot(), before);
}
