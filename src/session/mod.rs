// src/session/mod.rs

//! Per-student session layer.
//!
//! - [`session`] owns one program's graph + state and enforces the pacing
//!   rules (toggle cooldown, diagnostic display window).
//! - [`runtime`] is the async event-loop front end that serializes toggles
//!   and notifies subscribers of state changes.

pub mod runtime;
pub mod session;

pub use runtime::{SessionEvent, SessionRuntime, SessionUpdate};
pub use session::{ProgramSession, SessionOptions, ToggleOutcome};
