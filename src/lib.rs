//! ISPU Processor Library
//!
//! A Rust library for turning pollutant concentration time series into the
//! Indonesian air pollution standard index (ISPU) and for ingesting the CSV
//! uploads that carry those series.
//!
//! This library provides tools for:
//! - Interpolating pollutant concentrations against the fixed ISPU breakpoint tables
//! - Aggregating per-pollutant sub-indices into an index, category and dominant pollutant
//! - Tokenizing untrusted CSV text with proper quote and line-ending handling
//! - Validating upload headers against fixed column contracts before parsing
//! - Enriching parsed rows with index results and exporting them back to CSV

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod breakpoint_engine;
        pub mod csv_ingest;
        pub mod enrichment;
        pub mod export;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{AggregateIndex, Category, CsvTable, Pollutant, PollutantReading};
pub use app::services::breakpoint_engine::{BreakpointTables, aggregate, sub_index};
pub use app::services::csv_ingest::{IngestPipeline, parse_csv, validate_header};
pub use config::{HeaderSchema, IngestConfig};

/// Result type alias for the ISPU processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ISPU ingestion and index operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Observed header column set differs from the expected set
    #[error("CSV columns do not match the expected format (missing: [{}], unexpected: [{}])", .missing.join(", "), .extra.join(", "))]
    SchemaMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },

    /// Column sets match but the sequence differs
    #[error("CSV column order must be: {}", .expected.join(" | "))]
    OrderMismatch {
        expected: Vec<String>,
        observed: Vec<String>,
    },

    /// No usable rows in the input
    #[error("No data: {message}")]
    EmptyInput { message: String },

    /// More data rows than the configured limit
    #[error("Too many rows: {rows} data rows exceed the limit of {limit}")]
    RowLimitExceeded { rows: usize, limit: usize },

    /// A numeric column held a value that is not a number
    #[error("Row {row}: column '{column}' must be a number, found '{value}'")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    /// A required column was left empty
    #[error("Row {row}: missing value for column '{column}'")]
    MissingValue { row: usize, column: String },

    /// Pollutant identifier outside the fixed set
    #[error("Unknown pollutant: {name}")]
    UnknownPollutant { name: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error
    #[error("CSV writing error: {message}")]
    CsvWrite {
        message: String,
        #[source]
        source: csv::Error,
    },

    /// JSON serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a schema mismatch error
    pub fn schema_mismatch(missing: Vec<String>, extra: Vec<String>) -> Self {
        Self::SchemaMismatch { missing, extra }
    }

    /// Create an order mismatch error
    pub fn order_mismatch(expected: Vec<String>, observed: Vec<String>) -> Self {
        Self::OrderMismatch { expected, observed }
    }

    /// Create an empty input error
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: message.into(),
        }
    }

    /// Create a row limit error
    pub fn row_limit_exceeded(rows: usize, limit: usize) -> Self {
        Self::RowLimitExceeded { rows, limit }
    }

    /// Create an invalid number error (row is 1-based, counting data rows)
    pub fn invalid_number(row: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            row,
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create a missing value error (row is 1-based, counting data rows)
    pub fn missing_value(row: usize, column: impl Into<String>) -> Self {
        Self::MissingValue {
            row,
            column: column.into(),
        }
    }

    /// Create an unknown pollutant error
    pub fn unknown_pollutant(name: impl Into<String>) -> Self {
        Self::UnknownPollutant { name: name.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV writing error with context
    pub fn csv_write(message: impl Into<String>, source: csv::Error) -> Self {
        Self::CsvWrite {
            message: message.into(),
            source,
        }
    }

    /// Whether the caller can surface this error to the user and carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SchemaMismatch { .. }
                | Self::OrderMismatch { .. }
                | Self::EmptyInput { .. }
                | Self::RowLimitExceeded { .. }
                | Self::InvalidNumber { .. }
                | Self::MissingValue { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvWrite {
            message: "CSV writing failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
