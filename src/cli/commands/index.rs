//! Index command implementation
//!
//! Ingests one or more uploads, enriches every row with its aggregate index
//! and writes a report in the requested format.

use super::shared::{CommandStats, colorize_category, create_progress_bar, open_output, read_input};
use crate::app::services::breakpoint_engine::BreakpointTables;
use crate::app::services::csv_ingest::{IngestPipeline, IngestStats};
use crate::app::services::enrichment::{BatchSummary, EnrichedRow, enrich_table};
use crate::app::services::export::write_enriched_csv;
use crate::cli::args::{IndexArgs, OutputFormat};
use crate::{Error, Result};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Enriched contents of one input file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub stats: IngestStats,
    pub summary: BatchSummary,
    pub rows: Vec<EnrichedRow>,
}

/// Index command runner
pub fn run_index(args: IndexArgs, show_progress: bool) -> Result<CommandStats> {
    let start_time = Instant::now();
    debug!("Index arguments: {:?}", args);

    args.validate()?;

    let pipeline = IngestPipeline::new(args.ingest_config())?;
    let tables = BreakpointTables::standard();

    let progress_bar = (show_progress && args.files.len() > 1)
        .then(|| create_progress_bar(args.files.len() as u64, "Indexing files"));

    let mut reports = Vec::with_capacity(args.files.len());
    for path in &args.files {
        if let Some(pb) = &progress_bar {
            pb.set_message(path.display().to_string());
        }

        let report = process_file(&pipeline, tables, path);
        let report = match report {
            Ok(report) => report,
            Err(e) => {
                if let Some(pb) = &progress_bar {
                    pb.abandon_with_message(format!("Failed on {}", path.display()));
                }
                return Err(e);
            }
        };
        reports.push(report);

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Indexing complete");
    }

    let mut output = open_output(args.output_file.as_ref())?;
    match args.output_format {
        OutputFormat::Human => write_human_report(&reports, &mut output)?,
        OutputFormat::Json => write_json_report(&reports, &mut output)?,
        OutputFormat::Csv => {
            let rows: Vec<EnrichedRow> = reports.iter().flat_map(|r| r.rows.clone()).collect();
            write_enriched_csv(&rows, &mut output)?;
        }
    }
    output
        .flush()
        .map_err(|e| Error::io("Failed to flush report", e))?;

    let stats = CommandStats {
        files_processed: reports.len(),
        rows_processed: reports.iter().map(|r| r.summary.total_rows).sum(),
        rows_with_data: reports.iter().map(|r| r.summary.rows_with_data).sum(),
        processing_time: start_time.elapsed(),
    };

    info!(
        "Indexed {} rows from {} files ({:.1}% with pollutant data) in {:?}",
        stats.rows_processed,
        stats.files_processed,
        stats.coverage_rate(),
        stats.processing_time
    );

    Ok(stats)
}

/// Ingest and enrich a single file
pub fn process_file(
    pipeline: &IngestPipeline,
    tables: &BreakpointTables,
    path: &Path,
) -> Result<FileReport> {
    info!("Indexing {}", path.display());

    let text = read_input(path)?;
    let result = pipeline.ingest(&text)?;
    let rows = enrich_table(&result.table, tables)?;
    let summary = BatchSummary::from_rows(&rows);

    Ok(FileReport {
        path: path.display().to_string(),
        stats: result.stats,
        summary,
        rows,
    })
}

fn write_human_report<W: Write>(reports: &[FileReport], out: &mut W) -> Result<()> {
    for report in reports {
        writeln!(out, "\n{}", report.path.bright_green().bold())?;
        writeln!(
            out,
            "{:<14} {:>5}  {:<16} {}",
            "Date", "ISPU", "Category", "Dominant"
        )?;

        for row in &report.rows {
            match (row.aggregate.index, row.aggregate.category) {
                (Some(index), Some(category)) => writeln!(
                    out,
                    "{:<14} {:>5}  {:<16} {}",
                    row.label,
                    index,
                    colorize_category(category),
                    row.aggregate
                        .dominant
                        .map(|p| p.as_str())
                        .unwrap_or_default()
                )?,
                _ => writeln!(out, "{:<14} {:>5}  {}", row.label, "-", "no data".dimmed())?,
            }
        }

        write_summary(&report.summary, out)?;
    }
    Ok(())
}

fn write_summary<W: Write>(summary: &BatchSummary, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "  {} of {} rows with data",
        summary.rows_with_data.to_string().bright_white().bold(),
        summary.total_rows
    )?;
    if let Some(best) = &summary.best {
        writeln!(out, "  Best:  {} ({})", best.index, best.label)?;
    }
    if let Some(worst) = &summary.worst {
        writeln!(out, "  Worst: {} ({})", worst.index, worst.label)?;
    }
    if let Some(mean) = summary.mean_index {
        writeln!(out, "  Mean:  {:.1}", mean)?;
    }
    Ok(())
}

fn write_json_report<W: Write>(reports: &[FileReport], out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}
