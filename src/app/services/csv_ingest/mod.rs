//! Delimited-text ingestion pipeline for pollutant and meteorology uploads
//!
//! This module turns untrusted CSV text into structured rows before any value
//! reaches the index engine. Parsing is hand-rolled so quoting, escaping and
//! line-ending rules stay exactly as documented here.
//!
//! ## Architecture
//!
//! The pipeline is organized into logical components:
//! - [`tokenizer`] - Two-state quote-aware tokenizer producing rows of fields
//! - [`header`] - Header contract validation (column set and optional order)
//! - [`field_parsers`] - Row projection and numeric coercion into readings
//! - [`pipeline`] - Orchestration: fail-fast header preview, full parse, limits
//! - [`stats`] - Ingestion statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use ispu_processor::{HeaderSchema, IngestConfig, IngestPipeline};
//!
//! # fn example() -> ispu_processor::Result<()> {
//! let text = "Tanggal,PM10,SO2,CO,O3,NO2\n2025-10-12,27.0,85,2000,5.5,2.1\n";
//! let pipeline = IngestPipeline::new(IngestConfig::for_schema(HeaderSchema::Pollutants))?;
//! let result = pipeline.ingest(text)?;
//!
//! println!("Ingested {} rows", result.stats.data_rows);
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod header;
pub mod pipeline;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use field_parsers::{
    pick, reading_from_row, readings_from_table, validate_numeric_columns,
    validate_required_columns,
};
pub use header::{HeaderDiff, compare_headers, validate_header};
pub use pipeline::IngestPipeline;
pub use stats::{IngestResult, IngestStats};
pub use tokenizer::{Tokenizer, parse_csv};
