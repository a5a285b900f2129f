//! Calc command implementation
//!
//! Computes the aggregate index for concentrations given on the command line.

use super::shared::{CommandStats, colorize_category};
use crate::Result;
use crate::app::models::AggregateIndex;
use crate::app::services::breakpoint_engine::BreakpointTables;
use crate::app::services::enrichment::enrich_reading;
use crate::app::services::export::write_enriched_csv;
use crate::cli::args::{CalcArgs, OutputFormat};
use colored::Colorize;
use std::io::Write;
use std::time::Instant;
use tracing::debug;

/// Calc command runner
pub fn run_calc(args: CalcArgs) -> Result<CommandStats> {
    let start_time = Instant::now();
    debug!("Calc arguments: {:?}", args);

    args.validate()?;

    let row = enrich_reading("", args.reading(), BreakpointTables::standard());

    let mut out = std::io::stdout().lock();
    match args.output_format {
        OutputFormat::Human => write_human(&row.aggregate, &mut out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &row.aggregate)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_enriched_csv(std::slice::from_ref(&row), &mut out)?,
    }

    Ok(CommandStats {
        files_processed: 0,
        rows_processed: 1,
        rows_with_data: usize::from(row.aggregate.has_data()),
        processing_time: start_time.elapsed(),
    })
}

fn write_human<W: Write>(aggregate: &AggregateIndex, out: &mut W) -> Result<()> {
    let (Some(index), Some(category), Some(dominant)) =
        (aggregate.index, aggregate.category, aggregate.dominant)
    else {
        writeln!(out, "{}", "No pollutant concentrations given".dimmed())?;
        return Ok(());
    };

    writeln!(
        out,
        "ISPU {} {} ({}), dominant {}",
        index.to_string().bright_white().bold(),
        colorize_category(category),
        category.indonesian_label(),
        dominant.as_str().bright_white()
    )?;

    for (pollutant, sub_index) in &aggregate.sub_indices {
        writeln!(out, "  {:<5} {:>4}", pollutant.as_str(), sub_index)?;
    }

    Ok(())
}
