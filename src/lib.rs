// src/lib.rs

pub mod cli;
pub mod curriculum;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod session;

use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::cli::CliArgs;
use crate::curriculum::loader::{CurriculumRepository, FileRepository};
use crate::session::session::{ProgramSession, SessionOptions, ToggleOutcome};

/// High-level entry point used by `main.rs`.
///
/// Loads the curriculum file, builds a session for the requested program,
/// optionally applies a toggle sequence, and prints the per-year state
/// listing.
pub fn run(args: CliArgs) -> Result<()> {
    let repo = FileRepository::open(&args.curriculum)?;

    if args.list_programs {
        for id in repo.program_ids() {
            println!("{id}");
        }
        return Ok(());
    }

    let program = args
        .program
        .as_deref()
        .ok_or_else(|| anyhow!("--program is required unless --list-programs is given"))?;

    // Batch mode: no UI animations to pace, so no cooldown between toggles.
    let options = SessionOptions {
        cooldown: Duration::ZERO,
        ..SessionOptions::default()
    };
    let mut session = ProgramSession::load_with_options(&repo, program, options)?;

    if args.dry_run {
        print_dry_run(&session);
        return Ok(());
    }

    for name in &args.toggles {
        match session.toggle(name)? {
            ToggleOutcome::Applied { from, to, cascade } => {
                println!("toggle {name}: {from} -> {to}");
                for change in cascade {
                    println!("  cascade {}: {} -> {}", change.course, change.from, change.to);
                }
            }
            ToggleOutcome::Rejected { diagnostic } => {
                println!("toggle {name}: rejected");
                if !diagnostic.missing_approval.is_empty() {
                    println!("  needs approved: {}", diagnostic.missing_approval.join(", "));
                }
                if !diagnostic.missing_regular.is_empty() {
                    println!(
                        "  needs regularized: {}",
                        diagnostic.missing_regular.join(", ")
                    );
                }
            }
            ToggleOutcome::Ignored => {
                debug!(course = %name, "toggle ignored");
            }
        }
    }

    if !args.toggles.is_empty() {
        println!();
    }
    print_states(&session);

    Ok(())
}

/// Print the course list with prerequisites, no state.
fn print_dry_run(session: &ProgramSession) {
    println!("coursedag dry-run for program '{}'", session.program_id());
    println!("  courses: {}", session.graph().course_count());
    println!();

    let mut year = 0;
    for course in session.courses_for_display() {
        if course.year != year {
            year = course.year;
            println!("year {year}:");
        }
        println!("  - {} ({}, term {})", course.name, course.kind, course.term.number());
        if !course.approval_prereqs.is_empty() {
            println!("      approved: {}", course.approval_prereqs.join(", "));
        }
        if !course.regular_prereqs.is_empty() {
            println!("      regularized: {}", course.regular_prereqs.join(", "));
        }
    }

    debug!("dry-run complete (no toggles applied)");
}

/// Print current states grouped by year.
fn print_states(session: &ProgramSession) {
    println!("program '{}':", session.program_id());

    let mut year = 0;
    for course in session.courses_for_display() {
        if course.year != year {
            year = course.year;
            println!("year {year}:");
        }
        let state = session
            .state(&course.name)
            .map(|s| s.to_string())
            .unwrap_or_else(|_| "?".to_string());
        println!("  [{state:>9}] {}", course.name);
    }
}
