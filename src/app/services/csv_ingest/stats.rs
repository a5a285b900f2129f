//! Ingestion statistics and result structures
//!
//! This module provides types for tracking what the pipeline read, kept and
//! dropped, and for handing the parsed table to downstream enrichment.

use crate::app::models::CsvTable;
use crate::config::HeaderSchema;

/// Parsed upload with basic statistics
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// Header contract the upload satisfied
    pub schema: HeaderSchema,

    /// Tokenized header and non-blank data rows
    pub table: CsvTable,

    /// Basic ingestion statistics
    pub stats: IngestStats,
}

/// Simple ingestion statistics
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IngestStats {
    /// Rows produced by the tokenizer, header included
    pub rows_tokenized: usize,

    /// Data rows kept after dropping blank rows
    pub data_rows: usize,

    /// Rows dropped because every field was empty
    pub blank_rows_dropped: usize,

    /// Whether a byte-order mark was removed from the input
    pub bom_stripped: bool,
}

impl IngestStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            rows_tokenized: 0,
            data_rows: 0,
            blank_rows_dropped: 0,
            bom_stripped: false,
        }
    }

    /// Share of data rows kept, as a percentage
    pub fn retention_rate(&self) -> f64 {
        let candidates = self.data_rows + self.blank_rows_dropped;
        if candidates == 0 {
            0.0
        } else {
            (self.data_rows as f64 / candidates as f64) * 100.0
        }
    }
}

impl Default for IngestStats {
    fn default() -> Self {
        Self::new()
    }
}
