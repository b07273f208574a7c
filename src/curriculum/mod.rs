// src/curriculum/mod.rs

//! Curriculum loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and the validated [`Course`] node
//!   type (`model.rs`).
//! - Load a curriculum file from disk behind the [`CurriculumRepository`]
//!   trait (`loader.rs`).
//! - Validate record sanity and prerequisite acyclicity (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, CurriculumRepository, FileRepository};
pub use model::{Course, CourseKind, CourseRecord, CurriculumFile, ProgramSection, Term};
pub use validate::validate_program;
