//! Validate command implementation
//!
//! Runs a single upload through the ingestion pipeline and reports whether it
//! satisfies the selected header contract, row limit and numeric columns.

use super::shared::{CommandStats, read_input};
use crate::Result;
use crate::app::services::csv_ingest::IngestPipeline;
use crate::cli::args::ValidateArgs;
use colored::Colorize;
use std::time::Instant;
use tracing::{debug, info};

/// Validate command runner
pub fn run_validate(args: ValidateArgs) -> Result<CommandStats> {
    let start_time = Instant::now();
    debug!("Validation arguments: {:?}", args);

    args.validate()?;

    let pipeline = IngestPipeline::new(args.ingest_config())?;
    let text = read_input(&args.file)?;

    info!("Validating {}", args.file.display());
    let result = pipeline.ingest(&text)?;

    println!(
        "{} {} matches the {} schema",
        "✓".bright_green().bold(),
        args.file.display(),
        result.schema.to_string().bright_white().bold()
    );
    println!(
        "  {} data rows ({} blank rows dropped{})",
        result.stats.data_rows.to_string().bright_white().bold(),
        result.stats.blank_rows_dropped,
        if result.stats.bom_stripped {
            ", byte-order mark removed"
        } else {
            ""
        }
    );

    Ok(CommandStats {
        files_processed: 1,
        rows_processed: result.stats.data_rows,
        rows_with_data: 0,
        processing_time: start_time.elapsed(),
    })
}
