// src/curriculum/loader.rs

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::curriculum::model::{Course, CurriculumFile};
use crate::curriculum::validate::validate_program;
use crate::errors::LoadError;

/// A source of course records per program identifier.
///
/// The engine only ever sees validated [`Course`]s through this trait, so
/// the backing format (TOML file here, a spreadsheet or HTTP service
/// elsewhere) stays swappable. Implementations must be all-or-nothing: on
/// any failure they return a [`LoadError`] and yield no partial data.
pub trait CurriculumRepository {
    /// Load and validate the full course list for `program_id`.
    fn load_program(&self, program_id: &str) -> Result<Vec<Course>, LoadError>;

    /// Program ids this repository can serve, for listings and diagnostics.
    fn program_ids(&self) -> Vec<String>;
}

/// TOML-file-backed [`CurriculumRepository`].
///
/// The whole file is parsed once at construction; `load_program` then only
/// validates the requested section. Re-reading per call would make the
/// "either fully succeed or leave previous state untouched" rule depend on
/// filesystem races.
#[derive(Debug, Clone)]
pub struct FileRepository {
    file: CurriculumFile,
}

impl FileRepository {
    /// Open and parse a curriculum file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = load_from_path(path)?;
        Ok(Self { file })
    }

    /// Build a repository from an already-parsed file (used by tests).
    pub fn from_file(file: CurriculumFile) -> Self {
        Self { file }
    }
}

impl CurriculumRepository for FileRepository {
    fn load_program(&self, program_id: &str) -> Result<Vec<Course>, LoadError> {
        let section = self
            .file
            .program
            .get(program_id)
            .ok_or_else(|| LoadError::UnknownProgram(program_id.to_string()))?;

        validate_program(program_id, section)
    }

    fn program_ids(&self) -> Vec<String> {
        self.file.program.keys().cloned().collect()
    }
}

/// Read and deserialize a curriculum file from disk.
///
/// This only performs TOML deserialization; semantic validation (record
/// sanity, acyclicity) happens per program in
/// [`validate_program`](crate::curriculum::validate::validate_program).
pub fn load_from_path(path: impl AsRef<Path>) -> Result<CurriculumFile, LoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading curriculum file at {path:?}"))?;

    let file: CurriculumFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML curriculum from {path:?}"))?;

    Ok(file)
}
