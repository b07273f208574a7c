// src/session/runtime.rs

use std::collections::BTreeMap;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::curriculum::loader::CurriculumRepository;
use crate::engine::diagnostic::Diagnostic;
use crate::graph::state::{CourseState, StateChange};
use crate::session::session::{ProgramSession, ToggleOutcome};

/// Events sent into the runtime from the presentation layer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The student clicked a course lamp.
    ToggleRequested { course: String },
    /// The student picked a (possibly different) program; reload it from
    /// the repository.
    LoadRequested { program_id: String },
    ShutdownRequested,
}

/// Updates fanned out to subscribers.
///
/// A single toggle can change many courses (cascade), so state changes are
/// delivered as one batch per accepted toggle.
#[derive(Debug, Clone)]
pub enum SessionUpdate {
    /// States changed; the toggled course's own change comes first,
    /// followed by the cascade in application order.
    StateChanged { changes: Vec<StateChange> },
    /// A toggle was rejected; show this explanation.
    DiagnosticRaised { diagnostic: Diagnostic },
    /// The display window elapsed; hide the explanation.
    DiagnosticCleared,
    /// A program finished loading; re-render everything from this snapshot.
    /// Any pending diagnostic is gone with the old session.
    ProgramLoaded {
        program_id: String,
        states: BTreeMap<String, CourseState>,
    },
    /// A requested load failed; the previous program is still active and
    /// untouched.
    LoadFailed { program_id: String, reason: String },
}

/// Event-loop front end for a [`ProgramSession`].
///
/// Consumes [`SessionEvent`]s from one mpsc channel, applies them to the
/// session (one at a time, which serializes toggles), and fans
/// [`SessionUpdate`]s out to every subscriber. The diagnostic auto-clear is
/// a single re-armed sleep inside the select loop: raising a new diagnostic
/// moves the deadline, so two clears are never pending at once.
pub struct SessionRuntime {
    session: ProgramSession,
    repo: Box<dyn CurriculumRepository + Send>,
    events_rx: mpsc::Receiver<SessionEvent>,
    subscribers: Vec<mpsc::Sender<SessionUpdate>>,
}

impl SessionRuntime {
    pub fn new(
        session: ProgramSession,
        repo: Box<dyn CurriculumRepository + Send>,
        events_rx: mpsc::Receiver<SessionEvent>,
    ) -> Self {
        Self {
            session,
            repo,
            events_rx,
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber. Call before [`run`](Self::run).
    pub fn subscribe(&mut self) -> mpsc::Receiver<SessionUpdate> {
        let (tx, rx) = mpsc::channel(64);
        self.subscribers.push(tx);
        rx
    }

    /// Main event loop. Returns when the event channel closes or a
    /// [`SessionEvent::ShutdownRequested`] arrives.
    pub async fn run(mut self) -> Result<()> {
        info!(program = %self.session.program_id(), "session runtime started");

        loop {
            let clear_at = self.session.diagnostic_deadline();

            tokio::select! {
                maybe_event = self.events_rx.recv() => {
                    match maybe_event {
                        None => break,
                        Some(event) => {
                            debug!(?event, "runtime received event");
                            if !self.handle_event(event).await {
                                break;
                            }
                        }
                    }
                }
                _ = async {
                    match clear_at {
                        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
                        None => std::future::pending().await,
                    }
                } => {
                    debug!("diagnostic display window elapsed");
                    self.session.clear_diagnostic();
                    self.broadcast(SessionUpdate::DiagnosticCleared).await;
                }
            }
        }

        info!("session runtime exiting");
        Ok(())
    }

    /// Returns `false` when the runtime should stop.
    async fn handle_event(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::ToggleRequested { course } => {
                self.handle_toggle(&course).await;
                true
            }
            SessionEvent::LoadRequested { program_id } => {
                self.handle_load(&program_id).await;
                true
            }
            SessionEvent::ShutdownRequested => {
                info!("shutdown requested, stopping runtime");
                false
            }
        }
    }

    /// Switch the session to another program, all-or-nothing.
    ///
    /// On success subscribers get the fresh snapshot; the pending
    /// diagnostic (and its armed clear timer) vanished with the old
    /// session. On failure the current program stays active and
    /// subscribers are told why the load failed.
    async fn handle_load(&mut self, program_id: &str) {
        match self.session.switch_program(self.repo.as_ref(), program_id) {
            Ok(()) => {
                self.broadcast(SessionUpdate::ProgramLoaded {
                    program_id: program_id.to_string(),
                    states: self.session.snapshot(),
                })
                .await;
            }
            Err(err) => {
                warn!(program = %program_id, error = %err, "program load failed");
                self.broadcast(SessionUpdate::LoadFailed {
                    program_id: program_id.to_string(),
                    reason: err.to_string(),
                })
                .await;
            }
        }
    }

    async fn handle_toggle(&mut self, course: &str) {
        let outcome = match self.session.toggle(course) {
            Ok(outcome) => outcome,
            Err(err) => {
                // Integration bug in the caller; surface it loudly.
                error!(error = %err, "toggle for course not in loaded program");
                return;
            }
        };

        match outcome {
            ToggleOutcome::Applied { from, to, cascade } => {
                let mut changes = Vec::with_capacity(cascade.len() + 1);
                changes.push(StateChange {
                    course: course.to_string(),
                    from,
                    to,
                });
                changes.extend(cascade);
                self.broadcast(SessionUpdate::StateChanged { changes }).await;
            }
            ToggleOutcome::Rejected { diagnostic } => {
                self.broadcast(SessionUpdate::DiagnosticRaised { diagnostic })
                    .await;
            }
            ToggleOutcome::Ignored => {
                debug!(course = %course, "toggle ignored (cooldown)");
            }
        }
    }

    /// Send an update to every subscriber, dropping the ones that went away.
    async fn broadcast(&mut self, update: SessionUpdate) {
        let mut alive = Vec::with_capacity(self.subscribers.len());

        for tx in self.subscribers.drain(..) {
            match tx.send(update.clone()).await {
                Ok(()) => alive.push(tx),
                Err(_) => warn!("subscriber channel closed; dropping subscriber"),
            }
        }

        self.subscribers = alive;
    }
}
