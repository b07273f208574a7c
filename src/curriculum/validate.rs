// src/curriculum/validate.rs

use std::collections::BTreeSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::curriculum::model::{
    split_prereq_list, Course, CourseKind, CourseRecord, ProgramSection, Term,
};
use crate::errors::LoadError;

/// Validate one program section and turn its raw records into [`Course`]s.
///
/// This checks:
/// - the program has at least one course record
/// - every record has a non-empty, unique name and a positive year
/// - the term indicator normalizes (`"/"`, 0, 1 or 2)
/// - the optional kind label is `"annual"` or `"term"`
/// - no course lists itself as a prerequisite
/// - the prerequisite relation is acyclic
///
/// It does **not** reject prerequisite names that are missing from the
/// program: those are kept as permanently-unsatisfied dependencies and
/// reported at graph-build time.
pub fn validate_program(program_id: &str, section: &ProgramSection) -> Result<Vec<Course>, LoadError> {
    if section.course.is_empty() {
        return Err(LoadError::Empty(program_id.to_string()));
    }

    let mut courses = Vec::with_capacity(section.course.len());
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for record in &section.course {
        let course = validate_record(program_id, record)?;

        if !seen.insert(record.name.trim()) {
            return Err(invalid(
                program_id,
                format!("duplicate course name '{}'", record.name.trim()),
            ));
        }

        courses.push(course);
    }

    validate_acyclic(program_id, &courses)?;

    Ok(courses)
}

fn validate_record(program_id: &str, record: &CourseRecord) -> Result<Course, LoadError> {
    let name = record.name.trim();
    if name.is_empty() {
        return Err(invalid(program_id, "course with empty name".to_string()));
    }

    if record.year == 0 {
        return Err(invalid(
            program_id,
            format!("course '{name}' has year 0 (years are 1-based)"),
        ));
    }

    let term = record
        .term
        .normalize()
        .map_err(|reason| invalid(program_id, format!("course '{name}': {reason}")))?;

    let kind = effective_kind(record.kind.as_deref(), term)
        .map_err(|reason| invalid(program_id, format!("course '{name}': {reason}")))?;

    let approval_prereqs = split_prereq_list(&record.approved);
    let regular_prereqs = split_prereq_list(&record.regularized);

    for dep in approval_prereqs.iter().chain(regular_prereqs.iter()) {
        if dep == name {
            return Err(invalid(
                program_id,
                format!("course '{name}' lists itself as a prerequisite"),
            ));
        }
    }

    Ok(Course {
        name: name.to_string(),
        year: record.year,
        term,
        kind,
        approval_prereqs,
        regular_prereqs,
    })
}

/// Resolve the kind label, deriving it from the term when unspecified.
fn effective_kind(label: Option<&str>, term: Term) -> Result<CourseKind, String> {
    match label {
        None => Ok(match term {
            Term::Annual => CourseKind::Annual,
            Term::First | Term::Second => CourseKind::Term,
        }),
        Some(s) => match s.trim().to_lowercase().as_str() {
            "annual" => Ok(CourseKind::Annual),
            "term" => Ok(CourseKind::Term),
            other => Err(format!("kind must be \"annual\" or \"term\" (got {other:?})")),
        },
    }
}

/// Reject prerequisite cycles.
///
/// A cycle would leave every course on it permanently locked with no
/// diagnostic able to explain why, so it is a load failure rather than a
/// runtime surprise.
///
/// Edge direction: prerequisite -> dependent. Edges to names outside the
/// program are skipped; a dangling reference cannot participate in a cycle.
fn validate_acyclic(program_id: &str, courses: &[Course]) -> Result<(), LoadError> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for course in courses {
        graph.add_node(course.name.as_str());
    }

    for course in courses {
        for dep in course
            .approval_prereqs
            .iter()
            .chain(course.regular_prereqs.iter())
        {
            if graph.contains_node(dep.as_str()) {
                graph.add_edge(dep.as_str(), course.name.as_str(), ());
            }
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(LoadError::Cycle {
            program: program_id.to_string(),
            course: cycle.node_id().to_string(),
        }),
    }
}

fn invalid(program_id: &str, reason: String) -> LoadError {
    LoadError::InvalidRecord {
        program: program_id.to_string(),
        reason,
    }
}
