//! Command implementations for the ISPU processor CLI
//!
//! This module contains the main command dispatch. Each command is
//! implemented in its own module.

pub mod calc;
pub mod index;
pub mod shared;
pub mod validate;

pub use shared::CommandStats;

use crate::Result;
use crate::cli::args::{Args, Commands};
use tracing::debug;

/// Main command runner for the ISPU processor
///
/// Sets up logging from the global flags, then dispatches to the subcommand:
/// - `validate`: header and content checks for one upload
/// - `index`: per-row index enrichment with human, JSON or CSV reports
/// - `calc`: index for a single set of concentrations
///
/// Returns `Ok(None)` when no subcommand was given.
pub fn run(args: Args) -> Result<Option<CommandStats>> {
    setup_logging_for(&args)?;

    let show_progress = args.show_progress();
    let stats = match args.command {
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args)?,
        Some(Commands::Index(index_args)) => index::run_index(index_args, show_progress)?,
        Some(Commands::Calc(calc_args)) => calc::run_calc(calc_args)?,
        None => return Ok(None),
    };

    debug!("Command finished in {:?}", stats.processing_time);
    Ok(Some(stats))
}

fn setup_logging_for(args: &Args) -> Result<()> {
    if args.command.is_some() {
        shared::setup_logging(args)?;
    }
    Ok(())
}
