// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `coursedag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "coursedag",
    version,
    about = "Inspect a curriculum's prerequisite DAG and simulate course toggles.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the curriculum file (TOML).
    ///
    /// Default: `Curriculum.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Curriculum.toml")]
    pub curriculum: String,

    /// Program id to load (a `[program.<id>]` section in the file).
    #[arg(long, value_name = "ID")]
    pub program: Option<String>,

    /// List program ids found in the curriculum file and exit.
    #[arg(long)]
    pub list_programs: bool,

    /// Toggle these courses in order after loading, then print the result.
    ///
    /// Repeat the flag to toggle several times (also the same course).
    #[arg(long = "toggle", value_name = "NAME")]
    pub toggles: Vec<String>,

    /// Parse + validate, print the course list with prerequisites, but
    /// apply no toggles.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `COURSEDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
