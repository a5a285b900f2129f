//! Index enrichment for ingested rows
//!
//! This module joins the two halves of the processor: each ingested row is
//! coerced into a pollutant reading and run through the breakpoint engine.
//! Rows are independent, so order is preserved and nothing is shared but the
//! read-only tables.

use crate::Result;
use crate::app::models::{AggregateIndex, CsvTable, PollutantReading};
use crate::app::services::breakpoint_engine::{BreakpointTables, aggregate};
use crate::app::services::csv_ingest::reading_from_row;
use crate::constants::DATE_COLUMN;
use serde::Serialize;
use tracing::debug;

/// One observation with its index result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRow {
    /// Date label, passed through untouched
    pub label: String,

    /// Concentrations read from the row
    pub reading: PollutantReading,

    /// Aggregate index for the reading
    pub aggregate: AggregateIndex,
}

/// Enrich every data row of a table with its aggregate index
///
/// Rows without a date column get an empty label.
pub fn enrich_table(table: &CsvTable, tables: &BreakpointTables) -> Result<Vec<EnrichedRow>> {
    let mut enriched = Vec::with_capacity(table.data.len());

    for row in 0..table.data.len() {
        let reading = reading_from_row(table, row)?;
        let label = table.field(row, DATE_COLUMN).unwrap_or_default().to_string();
        enriched.push(enrich_reading(label, reading, tables));
    }

    let with_data = enriched.iter().filter(|r| r.aggregate.has_data()).count();
    debug!(
        "Enriched {} rows, {} with pollutant data",
        enriched.len(),
        with_data
    );

    Ok(enriched)
}

/// Enrich a single labelled reading
pub fn enrich_reading(
    label: impl Into<String>,
    reading: PollutantReading,
    tables: &BreakpointTables,
) -> EnrichedRow {
    let aggregate = aggregate(&reading, tables);
    EnrichedRow {
        label: label.into(),
        reading,
        aggregate,
    }
}

/// Index of one row referenced from a summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIndex {
    pub position: usize,
    pub label: String,
    pub index: u32,
}

/// Summary over a batch of enriched rows
///
/// Rows without data are counted but excluded from best, worst and mean.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_rows: usize,
    pub rows_with_data: usize,
    pub best: Option<RowIndex>,
    pub worst: Option<RowIndex>,
    pub mean_index: Option<f64>,
}

impl BatchSummary {
    /// Summarize rows; the first row wins ties for best and worst
    pub fn from_rows(rows: &[EnrichedRow]) -> Self {
        let indexed: Vec<RowIndex> = rows
            .iter()
            .enumerate()
            .filter_map(|(position, row)| {
                row.aggregate.index.map(|index| RowIndex {
                    position,
                    label: row.label.clone(),
                    index,
                })
            })
            .collect();

        let mut best: Option<&RowIndex> = None;
        let mut worst: Option<&RowIndex> = None;
        for candidate in &indexed {
            if best.is_none_or(|b| candidate.index < b.index) {
                best = Some(candidate);
            }
            if worst.is_none_or(|w| candidate.index > w.index) {
                worst = Some(candidate);
            }
        }

        let mean_index = if indexed.is_empty() {
            None
        } else {
            let total: u64 = indexed.iter().map(|r| u64::from(r.index)).sum();
            Some(total as f64 / indexed.len() as f64)
        };

        Self {
            total_rows: rows.len(),
            rows_with_data: indexed.len(),
            best: best.cloned(),
            worst: worst.cloned(),
            mean_index,
        }
    }
}
