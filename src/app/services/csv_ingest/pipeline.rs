//! Ingestion pipeline orchestration
//!
//! Runs the header contract against a one-row preview before the full parse,
//! so malformed uploads fail without tokenizing the whole file, then
//! tokenizes, drops blank rows, applies the row limit and checks numeric
//! columns.

use tracing::{debug, info};

use super::field_parsers::{validate_numeric_columns, validate_required_columns};
use super::header::validate_header;
use super::stats::{IngestResult, IngestStats};
use super::tokenizer::{Tokenizer, into_table, is_blank_row};
use crate::app::models::Pollutant;
use crate::config::IngestConfig;
use crate::constants::{BYTE_ORDER_MARK, HEADER_PREVIEW_ROWS, METEOROLOGY_VALUE_COLUMNS};
use crate::{Error, Result};

/// Ingestion pipeline bound to one configuration
#[derive(Debug, Clone)]
pub struct IngestPipeline {
    config: IngestConfig,
    tokenizer: Tokenizer,
}

impl IngestPipeline {
    /// Create a pipeline, validating the configuration
    pub fn new(config: IngestConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = Tokenizer::new(config.delimiter);
        Ok(Self { config, tokenizer })
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Validate only the header row of the text
    ///
    /// Returns the observed header on success.
    pub fn check_header(&self, text: &str) -> Result<Vec<String>> {
        let (body, _) = self.strip_bom(text);
        self.check_preview(body)
    }

    /// Parse and validate a complete upload
    ///
    /// Pollutant fields may be empty; meteorology fields must be filled.
    pub fn ingest(&self, text: &str) -> Result<IngestResult> {
        info!("Ingesting CSV upload against {} schema", self.config.schema);

        let (body, bom_stripped) = self.strip_bom(text);
        self.check_preview(body)?;

        let rows = self.tokenizer.tokenize_rows(body);
        let rows_tokenized = rows.len();
        let blank_rows_dropped = rows.iter().skip(1).filter(|r| is_blank_row(r)).count();
        let table = into_table(rows);

        if table.data.is_empty() {
            return Err(Error::empty_input("the upload has a header but no data rows"));
        }

        if let Some(limit) = self.config.max_rows {
            if table.data.len() > limit {
                return Err(Error::row_limit_exceeded(table.data.len(), limit));
            }
        }

        if self.config.schema.has_pollutants() {
            let pollutant_columns: Vec<&str> = Pollutant::ALL.iter().map(|p| p.as_str()).collect();
            validate_numeric_columns(&table, &pollutant_columns)?;
        }
        if self.config.schema.has_meteorology() {
            validate_required_columns(&table, METEOROLOGY_VALUE_COLUMNS)?;
            validate_numeric_columns(&table, METEOROLOGY_VALUE_COLUMNS)?;
        }

        let stats = IngestStats {
            rows_tokenized,
            data_rows: table.data.len(),
            blank_rows_dropped,
            bom_stripped,
        };

        info!(
            "Ingested {} data rows ({} blank rows dropped)",
            stats.data_rows, stats.blank_rows_dropped
        );

        Ok(IngestResult {
            schema: self.config.schema,
            table,
            stats,
        })
    }

    fn check_preview(&self, body: &str) -> Result<Vec<String>> {
        ensure_not_blank(body)?;

        let preview = self.tokenizer.tokenize_preview(body, HEADER_PREVIEW_ROWS);
        debug!("Header preview: {:?}", preview.header);

        if is_blank_row(&preview.header) {
            return Err(Error::empty_input("the upload has no header row"));
        }

        validate_header(
            preview.header.as_slice(),
            self.config.schema.columns(),
            self.config.enforce_order,
        )?;

        Ok(preview.header)
    }

    fn strip_bom<'a>(&self, text: &'a str) -> (&'a str, bool) {
        if !self.config.strip_bom {
            return (text, false);
        }

        match text.strip_prefix(BYTE_ORDER_MARK) {
            Some(rest) => (rest, true),
            None => (text, false),
        }
    }
}

fn ensure_not_blank(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::empty_input("the upload is empty"));
    }
    Ok(())
}
