//! CSV export of enriched rows
//!
//! Writes one line per observation with the date label, the five pollutant
//! concentrations and the index columns. Concentrations use a fixed number of
//! decimal places; absent values become empty cells.

use crate::app::models::Pollutant;
use crate::app::services::enrichment::EnrichedRow;
use crate::constants::{DATE_COLUMN, EXPORT_DECIMAL_PLACES, EXPORT_INDEX_COLUMNS};
use crate::{Error, Result};
use std::io::Write;
use tracing::debug;

/// Header row of the export
pub fn export_header() -> Vec<&'static str> {
    std::iter::once(DATE_COLUMN)
        .chain(Pollutant::ALL.iter().map(|p| p.as_str()))
        .chain(EXPORT_INDEX_COLUMNS.iter().copied())
        .collect()
}

/// Write enriched rows as CSV to any writer
pub fn write_enriched_csv<W: Write>(rows: &[EnrichedRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(export_header())
        .map_err(|e| Error::csv_write("Failed to write export header", e))?;

    for row in rows {
        csv_writer
            .write_record(export_record(row))
            .map_err(|e| Error::csv_write(format!("Failed to write row '{}'", row.label), e))?;
    }

    csv_writer
        .flush()
        .map_err(|e| Error::io("Failed to flush CSV export", e))?;

    debug!("Exported {} enriched rows", rows.len());
    Ok(())
}

/// Write enriched rows to an in-memory CSV string
pub fn enriched_csv_string(rows: &[EnrichedRow]) -> Result<String> {
    let mut buffer = Vec::new();
    write_enriched_csv(rows, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| Error::configuration(format!("Export produced invalid UTF-8: {}", e)))
}

fn export_record(row: &EnrichedRow) -> Vec<String> {
    let mut record = Vec::with_capacity(1 + Pollutant::ALL.len() + EXPORT_INDEX_COLUMNS.len());
    record.push(row.label.clone());

    for pollutant in Pollutant::ALL {
        record.push(
            row.reading
                .get(pollutant)
                .map(format_concentration)
                .unwrap_or_default(),
        );
    }

    let aggregate = &row.aggregate;
    record.push(aggregate.index.map(|i| i.to_string()).unwrap_or_default());
    record.push(
        aggregate
            .dominant
            .map(|p| p.as_str().to_string())
            .unwrap_or_default(),
    );
    record.push(
        aggregate
            .category
            .map(|c| c.label().to_string())
            .unwrap_or_default(),
    );

    record
}

fn format_concentration(value: f64) -> String {
    format!("{:.*}", EXPORT_DECIMAL_PLACES, value)
}
