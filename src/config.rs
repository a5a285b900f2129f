//! Configuration management and validation.
//!
//! Provides the ingestion configuration (which header contract an upload must
//! satisfy, whether column order is enforced, row limits) and the header
//! schema definitions for the different upload modes.

use crate::constants::{
    DEFAULT_DELIMITER, FULL_HEADERS, MAX_METEOROLOGY_ROWS, METEOROLOGY_HEADERS, POLLUTANT_HEADERS,
    QUOTE_CHAR,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Header contract an upload is validated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum HeaderSchema {
    /// Date, the five pollutants, then the five meteorology columns
    Full,
    /// Date plus meteorology columns (prediction input)
    Meteorology,
    /// Date plus the five pollutants
    Pollutants,
}

impl HeaderSchema {
    /// Expected columns in contract order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            HeaderSchema::Full => FULL_HEADERS,
            HeaderSchema::Meteorology => METEOROLOGY_HEADERS,
            HeaderSchema::Pollutants => POLLUTANT_HEADERS,
        }
    }

    /// Expected columns as owned strings
    pub fn expected(&self) -> Vec<String> {
        self.columns().iter().map(|c| c.to_string()).collect()
    }

    /// Whether rows under this schema carry pollutant concentrations
    pub fn has_pollutants(&self) -> bool {
        !matches!(self, HeaderSchema::Meteorology)
    }

    /// Whether rows under this schema carry meteorology values
    pub fn has_meteorology(&self) -> bool {
        !matches!(self, HeaderSchema::Pollutants)
    }
}

impl fmt::Display for HeaderSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeaderSchema::Full => "full",
            HeaderSchema::Meteorology => "meteorology",
            HeaderSchema::Pollutants => "pollutants",
        };
        write!(f, "{}", name)
    }
}

/// Configuration for one ingestion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Header contract the upload must satisfy
    pub schema: HeaderSchema,

    /// Require the exact column order, not just the same column set
    pub enforce_order: bool,

    /// Field delimiter
    pub delimiter: char,

    /// Maximum number of data rows accepted (None = unlimited)
    pub max_rows: Option<usize>,

    /// Drop a leading UTF-8 byte-order mark before tokenizing
    pub strip_bom: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            schema: HeaderSchema::Full,
            enforce_order: true,
            delimiter: DEFAULT_DELIMITER,
            max_rows: None,
            strip_bom: true,
        }
    }
}

impl IngestConfig {
    /// Configuration with the defaults appropriate for a schema
    ///
    /// Meteorology uploads are capped at one week of rows.
    pub fn for_schema(schema: HeaderSchema) -> Self {
        let max_rows = match schema {
            HeaderSchema::Meteorology => Some(MAX_METEOROLOGY_ROWS),
            _ => None,
        };

        Self {
            schema,
            max_rows,
            ..Self::default()
        }
    }

    /// Accept columns in any order
    pub fn with_any_order(mut self) -> Self {
        self.enforce_order = false;
        self
    }

    /// Set the column order requirement
    pub fn with_enforce_order(mut self, enforce_order: bool) -> Self {
        self.enforce_order = enforce_order;
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the data row limit
    pub fn with_max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Keep a leading byte-order mark as part of the first header cell
    pub fn without_bom_stripping(mut self) -> Self {
        self.strip_bom = false;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == QUOTE_CHAR || self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(Error::configuration(format!(
                "Delimiter {:?} conflicts with quoting or line endings",
                self.delimiter
            )));
        }

        if self.max_rows == Some(0) {
            return Err(Error::configuration(
                "Row limit must be greater than 0".to_string(),
            ));
        }

        debug!(
            "Ingest configuration valid: schema={}, enforce_order={}, max_rows={:?}",
            self.schema, self.enforce_order, self.max_rows
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IngestConfig::default();
        assert_eq!(config.schema, HeaderSchema::Full);
        assert!(config.enforce_order);
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.max_rows, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_meteorology_defaults_to_one_week() {
        let config = IngestConfig::for_schema(HeaderSchema::Meteorology);
        assert_eq!(config.max_rows, Some(7));
        assert!(!config.schema.has_pollutants());
        assert!(config.schema.has_meteorology());
    }

    #[test]
    fn test_builder_methods() {
        let config = IngestConfig::for_schema(HeaderSchema::Pollutants)
            .with_any_order()
            .with_delimiter(';')
            .with_max_rows(Some(30));

        assert!(!config.enforce_order);
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.max_rows, Some(30));
        assert!(!config.schema.has_meteorology());
    }

    #[test]
    fn test_invalid_delimiter_rejected() {
        let config = IngestConfig::default().with_delimiter('"');
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_zero_row_limit_rejected() {
        let config = IngestConfig::default().with_max_rows(Some(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_schema_columns() {
        assert_eq!(HeaderSchema::Full.columns().len(), 11);
        assert_eq!(HeaderSchema::Meteorology.columns()[0], "Tanggal");
        assert_eq!(
            HeaderSchema::Pollutants.expected(),
            vec!["Tanggal", "PM10", "SO2", "CO", "O3", "NO2"]
        );
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = IngestConfig::for_schema(HeaderSchema::Meteorology).with_any_order();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"meteorology\""));
        let back: IngestConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
