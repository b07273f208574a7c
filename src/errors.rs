// src/errors.rs

//! Crate-wide error types.
//!
//! Two structured failure modes exist in the core:
//!
//! - [`LoadError`]: a curriculum load attempt failed as a whole. The caller's
//!   previously loaded program (if any) is left untouched.
//! - [`UnknownCourseError`]: a course name that is not part of the loaded
//!   program was passed to `state`/`toggle`. This is a caller bug and is
//!   surfaced loudly instead of being silently ignored.
//!
//! A rejected toggle is *not* an error; see
//! [`ToggleResponse`](crate::engine::ToggleResponse).
//!
//! The binary layer composes these with `anyhow` as usual.

use thiserror::Error;

/// A curriculum could not be loaded for a program.
///
/// All variants are fatal to the load attempt: the engine never keeps a
/// partially initialized graph or state store around.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The curriculum file has no `[program.<id>]` section for this id.
    #[error("unknown program '{0}' in curriculum file")]
    UnknownProgram(String),

    /// The file could not be read or is not valid TOML; carries the
    /// contextualized I/O or parse failure.
    #[error(transparent)]
    Source(#[from] anyhow::Error),

    /// The program exists but contains zero usable course records.
    #[error("program '{0}' contains no courses")]
    Empty(String),

    /// A course record is semantically invalid (duplicate or empty name,
    /// bad year/term, self-dependency).
    #[error("invalid course record in program '{program}': {reason}")]
    InvalidRecord { program: String, reason: String },

    /// The prerequisite relation contains a cycle, which would leave the
    /// involved courses permanently locked with no explanation.
    #[error("prerequisite cycle detected in program '{program}' involving course '{course}'")]
    Cycle { program: String, course: String },
}

/// A course name not present in the loaded program was passed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown course '{0}' in loaded program")]
pub struct UnknownCourseError(pub String);
