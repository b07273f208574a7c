// src/engine/mod.rs

//! Core engine: satisfaction predicate, cascade propagation, the toggle
//! state machine and diagnostic resolution.
//!
//! All operations here are synchronous pure-ish functions over
//! (`CourseGraph`, `StateStore`); session pacing (cooldowns, display
//! windows, notification) lives in [`crate::session`].

pub mod cascade;
pub mod diagnostic;
pub mod transition;

pub use cascade::{cascade_from, is_satisfied, settle_all};
pub use diagnostic::Diagnostic;
pub use transition::{toggle, ToggleResponse};
