//! Field parsing utilities for tokenized rows
//!
//! This module provides helper functions for projecting rows and coercing
//! string fields into numbers with row-numbered error messages.

use crate::app::models::{CsvTable, Pollutant, PollutantReading};
use crate::{Error, Result};
use std::collections::HashMap;

/// Project a mapping down to the named keys, in the order given
///
/// Keys absent from the source are skipped.
pub fn pick<V: Clone>(source: &HashMap<String, V>, keys: &[&str]) -> Vec<(String, V)> {
    keys.iter()
        .filter_map(|key| source.get(*key).map(|value| (key.to_string(), value.clone())))
        .collect()
}

/// Parse an optional numeric field; empty means absent
///
/// `row` is the 1-based data row number used in error messages.
pub fn parse_optional_number(row: usize, column: &str, raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(Some(value)),
        _ => Err(Error::invalid_number(row, column, trimmed)),
    }
}

/// Build a pollutant reading from one data row
///
/// Header columns that name a pollutant are read; every other column is
/// skipped. Empty fields leave that pollutant absent from the reading.
pub fn reading_from_row(table: &CsvTable, row: usize) -> Result<PollutantReading> {
    let mut reading = PollutantReading::new();
    let Some(fields) = table.data.get(row) else {
        return Ok(reading);
    };

    for (column, raw) in table.header.iter().zip(fields) {
        let Ok(pollutant) = column.parse::<Pollutant>() else {
            continue;
        };

        if let Some(value) = parse_optional_number(row + 1, column, raw)? {
            reading.set(pollutant, value);
        }
    }

    Ok(reading)
}

/// Build readings for every data row, failing on the first non-numeric field
pub fn readings_from_table(table: &CsvTable) -> Result<Vec<PollutantReading>> {
    (0..table.data.len())
        .map(|row| reading_from_row(table, row))
        .collect()
}

/// Check that every data row has a value in each of the given columns
///
/// Columns absent from the header are ignored; header validation owns that.
/// Short rows count as missing the trailing columns.
pub fn validate_required_columns(table: &CsvTable, columns: &[&str]) -> Result<()> {
    let required: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|column| table.column_index(column).is_some())
        .collect();

    for row in 0..table.data.len() {
        let fields = table.row_map(row).unwrap_or_default();
        let present = pick(&fields, &required);

        for column in &required {
            let filled = present
                .iter()
                .any(|(name, value)| name == column && !value.is_empty());
            if !filled {
                return Err(Error::missing_value(row + 1, *column));
            }
        }
    }

    Ok(())
}

/// Check that every non-empty field in the given columns is numeric
///
/// Columns absent from the header are ignored; header validation owns that.
pub fn validate_numeric_columns(table: &CsvTable, columns: &[&str]) -> Result<()> {
    for column in columns {
        let Some(index) = table.column_index(column) else {
            continue;
        };

        for (row, fields) in table.data.iter().enumerate() {
            if let Some(raw) = fields.get(index) {
                parse_optional_number(row + 1, column, raw)?;
            }
        }
    }

    Ok(())
}
