// src/curriculum/model.rs

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Top-level curriculum file as read from TOML.
///
/// One file can carry several programs:
///
/// ```toml
/// [program.sistemas]
/// label = "Tecnicatura en Sistemas"
///
/// [[program.sistemas.course]]
/// name = "Matematica I"
/// year = 1
/// term = "/"
/// approved = ""
/// regularized = ""
///
/// [[program.sistemas.course]]
/// name = "Matematica II"
/// year = 2
/// term = 1
/// approved = "Matematica I"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CurriculumFile {
    /// All programs from `[program.<id>]`.
    ///
    /// Keys are the *program ids* (e.g. `"sistemas"`, `"redes"`).
    #[serde(default)]
    pub program: BTreeMap<String, ProgramSection>,
}

/// `[program.<id>]` section: a display label plus the course records.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProgramSection {
    /// Human-readable program name; falls back to the id when absent.
    #[serde(default)]
    pub label: Option<String>,

    /// All `[[program.<id>.course]]` records, in file order.
    #[serde(default)]
    pub course: Vec<CourseRecord>,
}

/// One `[[program.<id>.course]]` record, close to the upstream spreadsheet
/// row shape so existing curricula translate mechanically.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseRecord {
    /// Course name. Doubles as the course id: unique within the program,
    /// and the value referenced by other courses' prerequisite lists.
    pub name: String,

    /// Academic year (1-based).
    pub year: u32,

    /// Term indicator. The upstream source encodes "annual" ambiguously as
    /// either a literal `"/"` sentinel or a numeric 0; both are accepted
    /// here, plus 1 and 2 for term courses.
    #[serde(default)]
    pub term: TermField,

    /// Optional type label (`"annual"` / `"term"`). When absent, the kind
    /// is derived from `term`.
    #[serde(default)]
    pub kind: Option<String>,

    /// Comma-separated names of courses that must be *approved* before this
    /// one can advance past eligibility.
    #[serde(default)]
    pub approved: String,

    /// Comma-separated names of courses that must be at least *regularized*
    /// before this one can advance past eligibility.
    #[serde(default)]
    pub regularized: String,
}

/// Raw `term` field, before validation.
///
/// Untagged so both `term = "/"` and `term = 0` deserialize.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TermField {
    Numeric(i64),
    Sentinel(String),
}

impl Default for TermField {
    fn default() -> Self {
        TermField::Numeric(0)
    }
}

impl TermField {
    /// Normalize the raw field into a [`Term`], or explain why it is invalid.
    pub fn normalize(&self) -> Result<Term, String> {
        match self {
            TermField::Numeric(0) => Ok(Term::Annual),
            TermField::Numeric(1) => Ok(Term::First),
            TermField::Numeric(2) => Ok(Term::Second),
            TermField::Numeric(n) => Err(format!("term must be 0, 1 or 2 (got {n})")),
            TermField::Sentinel(s) if s.trim() == "/" => Ok(Term::Annual),
            TermField::Sentinel(s) => {
                Err(format!("term must be \"/\", 0, 1 or 2 (got {s:?})"))
            }
        }
    }
}

/// Normalized term of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    Annual,
    First,
    Second,
}

impl Term {
    /// Numeric form used for display (`0` = annual).
    pub fn number(self) -> u8 {
        match self {
            Term::Annual => 0,
            Term::First => 1,
            Term::Second => 2,
        }
    }
}

/// Kind label of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseKind {
    Annual,
    Term,
}

impl fmt::Display for CourseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseKind::Annual => write!(f, "annual"),
            CourseKind::Term => write!(f, "term"),
        }
    }
}

/// A validated course: the node type consumed by the dependency graph.
///
/// Immutable after load; only the per-session state attached to it mutates.
#[derive(Debug, Clone)]
pub struct Course {
    pub name: String,
    pub year: u32,
    pub term: Term,
    pub kind: CourseKind,

    /// Names of courses that must reach `Approved`.
    pub approval_prereqs: Vec<String>,

    /// Names of courses that must reach at least `Regular`.
    pub regular_prereqs: Vec<String>,
}

impl Course {
    /// True if this course has no prerequisites of either kind.
    pub fn is_prereq_free(&self) -> bool {
        self.approval_prereqs.is_empty() && self.regular_prereqs.is_empty()
    }
}

/// Split a comma-separated prerequisite list into trimmed, non-empty names.
pub fn split_prereq_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
