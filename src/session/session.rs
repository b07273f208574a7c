// src/session/session.rs

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::curriculum::loader::CurriculumRepository;
use crate::curriculum::model::Course;
use crate::engine::cascade::settle_all;
use crate::engine::diagnostic::Diagnostic;
use crate::engine::transition::{self, ToggleResponse};
use crate::errors::{LoadError, UnknownCourseError};
use crate::graph::graph::CourseGraph;
use crate::graph::state::{CourseState, StateChange, StateStore};

/// Pacing knobs for one session.
///
/// Both are presentation concerns, not core correctness rules: the cooldown
/// lets animations settle between accepted toggles, and the window bounds
/// how long a rejection explanation stays on screen.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Minimum gap between *accepted* toggles; earlier arrivals are ignored.
    pub cooldown: Duration,
    /// How long a diagnostic stays active before auto-clearing.
    pub diagnostic_window: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_millis(300),
            diagnostic_window: Duration::from_millis(3500),
        }
    }
}

/// Outcome of a session-level toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Transition applied; `cascade` lists the downstream changes.
    Applied {
        from: CourseState,
        to: CourseState,
        cascade: Vec<StateChange>,
    },
    /// Transition rejected; the diagnostic is now active for the display
    /// window.
    Rejected { diagnostic: Diagnostic },
    /// Arrived inside the cooldown window; dropped without touching state.
    Ignored,
}

impl ToggleOutcome {
    pub fn accepted(&self) -> bool {
        matches!(self, ToggleOutcome::Applied { .. })
    }
}

/// Currently displayed diagnostic plus its auto-clear deadline.
#[derive(Debug, Clone)]
struct ActiveDiagnostic {
    diagnostic: Diagnostic,
    expires_at: Instant,
}

/// One student session over one loaded program.
///
/// Owns the graph and state store built from a single
/// [`CurriculumRepository`] load. Constructed fresh per program: a failed
/// load never produces a session, so the caller's previous session (if any)
/// stays intact. No cross-session or cross-program state.
///
/// Single-threaded by design; callers invoke one operation at a time.
#[derive(Debug)]
pub struct ProgramSession {
    program_id: String,
    graph: CourseGraph,
    store: StateStore,
    options: SessionOptions,

    last_accepted: Option<Instant>,
    active: Option<ActiveDiagnostic>,
}

impl ProgramSession {
    /// Load a program with default pacing options.
    pub fn load(
        repo: &dyn CurriculumRepository,
        program_id: &str,
    ) -> Result<Self, LoadError> {
        Self::load_with_options(repo, program_id, SessionOptions::default())
    }

    /// Load a program: fetch + validate courses, build the graph, seed the
    /// store, and settle the whole program to its initial fixpoint.
    pub fn load_with_options(
        repo: &dyn CurriculumRepository,
        program_id: &str,
        options: SessionOptions,
    ) -> Result<Self, LoadError> {
        let courses = repo.load_program(program_id)?;
        let graph = CourseGraph::from_courses(courses);
        let mut store = StateStore::initialize(&graph);

        let settled = settle_all(&graph, &mut store);
        info!(
            program = %program_id,
            courses = graph.course_count(),
            settled = settled.len(),
            "program loaded"
        );

        Ok(Self {
            program_id: program_id.to_string(),
            graph,
            store,
            options,
            last_accepted: None,
            active: None,
        })
    }

    /// Replace this session with a freshly loaded program.
    ///
    /// All-or-nothing: on error the current program, states and pending
    /// diagnostic are left exactly as they were.
    pub fn switch_program(
        &mut self,
        repo: &dyn CurriculumRepository,
        program_id: &str,
    ) -> Result<(), LoadError> {
        let fresh = Self::load_with_options(repo, program_id, self.options)?;
        *self = fresh;
        Ok(())
    }

    pub fn program_id(&self) -> &str {
        &self.program_id
    }

    pub fn graph(&self) -> &CourseGraph {
        &self.graph
    }

    /// Courses sorted for display: by year, then term, then name.
    pub fn courses_for_display(&self) -> Vec<&Course> {
        let mut courses: Vec<&Course> = self.graph.courses().collect();
        courses.sort_by(|a, b| {
            (a.year, a.term.number(), a.name.as_str())
                .cmp(&(b.year, b.term.number(), b.name.as_str()))
        });
        courses
    }

    /// Current state of one course.
    pub fn state(&self, course: &str) -> Result<CourseState, UnknownCourseError> {
        self.store.get(course)
    }

    /// Read-only state copy for rendering, ordered by course name.
    pub fn snapshot(&self) -> BTreeMap<String, CourseState> {
        self.store.snapshot()
    }

    /// Apply one user toggle now.
    pub fn toggle(&mut self, course: &str) -> Result<ToggleOutcome, UnknownCourseError> {
        self.toggle_at(course, Instant::now())
    }

    /// Apply one user toggle at an explicit instant (injectable for tests).
    ///
    /// Any attempt, accepted or not, replaces the pending diagnostic: at
    /// most one is active at a time.
    pub fn toggle_at(
        &mut self,
        course: &str,
        now: Instant,
    ) -> Result<ToggleOutcome, UnknownCourseError> {
        if let Some(last) = self.last_accepted {
            if now.duration_since(last) < self.options.cooldown {
                debug!(course = %course, "toggle inside cooldown window; ignoring");
                return Ok(ToggleOutcome::Ignored);
            }
        }

        self.active = None;

        match transition::toggle(&self.graph, &mut self.store, course)? {
            ToggleResponse::Applied { from, to, cascade } => {
                self.last_accepted = Some(now);
                Ok(ToggleOutcome::Applied { from, to, cascade })
            }
            ToggleResponse::Rejected { diagnostic } => {
                self.active = Some(ActiveDiagnostic {
                    diagnostic: diagnostic.clone(),
                    expires_at: now + self.options.diagnostic_window,
                });
                Ok(ToggleOutcome::Rejected { diagnostic })
            }
        }
    }

    /// The diagnostic currently on display, if its window has not elapsed.
    pub fn active_diagnostic(&self) -> Option<&Diagnostic> {
        self.active_diagnostic_at(Instant::now())
    }

    /// Clock-injectable variant of [`active_diagnostic`](Self::active_diagnostic).
    pub fn active_diagnostic_at(&self, now: Instant) -> Option<&Diagnostic> {
        match &self.active {
            Some(active) if now < active.expires_at => Some(&active.diagnostic),
            _ => None,
        }
    }

    /// When the pending diagnostic should auto-clear, if one is pending.
    ///
    /// Used by the async runtime to arm its single clear timer.
    pub fn diagnostic_deadline(&self) -> Option<Instant> {
        self.active.as_ref().map(|a| a.expires_at)
    }

    /// Drop the pending diagnostic (timed clear fired, or program switch).
    pub fn clear_diagnostic(&mut self) {
        self.active = None;
    }
}
