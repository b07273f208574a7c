// src/graph/mod.rs

//! Prerequisite graph and per-session course state.
//!
//! - [`graph`] holds the immutable dependency graph of a loaded program.
//! - [`state`] holds the mutable per-course state and its closed state enum.

pub mod graph;
pub mod state;

pub use graph::CourseGraph;
pub use state::{CourseState, StateChange, StateStore};
