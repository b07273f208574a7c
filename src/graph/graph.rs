// src/graph/graph.rs

use std::collections::HashMap;

use tracing::warn;

use crate::curriculum::model::Course;

/// Internal node structure: the course itself plus its direct dependents.
#[derive(Debug, Clone)]
struct CourseNode {
    course: Course,
    /// Courses that list this one in either prerequisite set.
    dependents: Vec<String>,
}

/// In-memory prerequisite graph keyed by course name.
///
/// Acyclicity is validated in `curriculum::validate` before construction,
/// so this type only keeps adjacency information for cascade propagation
/// and diagnostics. No mutation after construction; a program switch
/// builds a fresh graph.
#[derive(Debug, Clone)]
pub struct CourseGraph {
    nodes: HashMap<String, CourseNode>,
}

impl CourseGraph {
    /// Build the graph from a validated course list.
    ///
    /// Prerequisite names that do not match any course in the list are kept
    /// as-is (they can never be satisfied, so the dependent course stays
    /// locked) and reported with a warning so integrators notice.
    pub fn from_courses(courses: Vec<Course>) -> Self {
        let mut nodes: HashMap<String, CourseNode> = HashMap::new();

        // First pass: create nodes.
        for course in courses {
            nodes.insert(
                course.name.clone(),
                CourseNode {
                    course,
                    dependents: Vec::new(),
                },
            );
        }

        // Second pass: populate dependents based on both prerequisite kinds.
        let names: Vec<String> = nodes.keys().cloned().collect();
        for name in names {
            let deps: Vec<String> = nodes
                .get(&name)
                .map(|n| {
                    n.course
                        .approval_prereqs
                        .iter()
                        .chain(n.course.regular_prereqs.iter())
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();

            for dep in deps {
                match nodes.get_mut(&dep) {
                    Some(dep_node) => dep_node.dependents.push(name.clone()),
                    None => {
                        warn!(
                            course = %name,
                            prerequisite = %dep,
                            "prerequisite names a course outside the program; it can never be satisfied"
                        );
                    }
                }
            }
        }

        Self { nodes }
    }

    /// Number of courses in the program.
    pub fn course_count(&self) -> usize {
        self.nodes.len()
    }

    /// All courses, in no particular order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.nodes.values().map(|n| &n.course)
    }

    /// All course names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Look up one course by name.
    pub fn get(&self, name: &str) -> Option<&Course> {
        self.nodes.get(name).map(|n| &n.course)
    }

    /// Courses that list `name` in either prerequisite set.
    pub fn dependents_of(&self, name: &str) -> &[String] {
        self.nodes
            .get(name)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }
}
