//! Command-line argument definitions for the ISPU processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::models::{Pollutant, PollutantReading};
use crate::config::{HeaderSchema, IngestConfig};
use crate::{Error, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ISPU processor
///
/// Validates air quality CSV uploads and computes the Indonesian air
/// pollution standard index (ISPU) for every observation they contain.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ispu-processor",
    version,
    about = "Validate air quality CSV uploads and compute ISPU indices",
    long_about = "Validates CSV uploads of daily pollutant and meteorology observations against \
                  fixed column contracts, then computes the Indonesian air pollution standard \
                  index (ISPU), health category and dominant pollutant for every row."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
    pub verbose: u8,

    /// Suppress all logging except errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress progress output and non-error logging"
    )]
    pub quiet: bool,
}

/// Available subcommands for the ISPU processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Check that a CSV upload satisfies a header contract
    Validate(ValidateArgs),
    /// Compute ISPU indices for every row of one or more CSV uploads
    Index(IndexArgs),
    /// Compute the ISPU index for a single set of concentrations
    Calc(CalcArgs),
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// CSV file to validate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Header contract the file must satisfy
    #[arg(
        short = 's',
        long = "schema",
        value_enum,
        default_value_t = HeaderSchema::Full,
        help = "Header contract the file must satisfy"
    )]
    pub schema: HeaderSchema,

    /// Accept the expected columns in any order
    #[arg(long = "any-order", help = "Accept the expected columns in any order")]
    pub any_order: bool,
}

/// Arguments for the index command
#[derive(Debug, Clone, Parser)]
pub struct IndexArgs {
    /// CSV files to process
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Header contract every file must satisfy
    #[arg(
        short = 's',
        long = "schema",
        value_enum,
        default_value_t = HeaderSchema::Pollutants,
        help = "Header contract every file must satisfy"
    )]
    pub schema: HeaderSchema,

    /// Accept the expected columns in any order
    #[arg(long = "any-order", help = "Accept the expected columns in any order")]
    pub any_order: bool,

    /// Maximum number of data rows per file
    ///
    /// Overrides the schema default (meteorology uploads are limited to 7 rows).
    #[arg(
        long = "max-rows",
        value_name = "N",
        help = "Maximum number of data rows per file"
    )]
    pub max_rows: Option<usize>,

    /// Output format for the report
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Human,
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,

    /// Output file for the report; stdout when omitted
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        help = "Output file for the report"
    )]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the calc command
#[derive(Debug, Clone, Parser)]
pub struct CalcArgs {
    /// PM10 concentration
    #[arg(long = "pm10", value_name = "VALUE", allow_negative_numbers = true)]
    pub pm10: Option<f64>,

    /// SO2 concentration
    #[arg(long = "so2", value_name = "VALUE", allow_negative_numbers = true)]
    pub so2: Option<f64>,

    /// CO concentration
    #[arg(long = "co", value_name = "VALUE", allow_negative_numbers = true)]
    pub co: Option<f64>,

    /// O3 concentration
    #[arg(long = "o3", value_name = "VALUE", allow_negative_numbers = true)]
    pub o3: Option<f64>,

    /// NO2 concentration
    #[arg(long = "no2", value_name = "VALUE", allow_negative_numbers = true)]
    pub no2: Option<f64>,

    /// Output format for the result
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Human,
        help = "Output format for the result"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Args {
    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if progress bars should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ValidateArgs {
    /// Validate the command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        ensure_file(&self.file)
    }

    /// Ingestion configuration for this run
    pub fn ingest_config(&self) -> IngestConfig {
        IngestConfig::for_schema(self.schema).with_enforce_order(!self.any_order)
    }
}

impl IndexArgs {
    /// Validate the command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.schema == HeaderSchema::Meteorology {
            return Err(Error::configuration(
                "The meteorology schema carries no pollutant columns to index",
            ));
        }

        if self.max_rows == Some(0) {
            return Err(Error::configuration("--max-rows must be greater than 0"));
        }

        for file in &self.files {
            ensure_file(file)?;
        }

        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Ingestion configuration for this run
    pub fn ingest_config(&self) -> IngestConfig {
        let config = IngestConfig::for_schema(self.schema).with_enforce_order(!self.any_order);
        match self.max_rows {
            Some(limit) => config.with_max_rows(Some(limit)),
            None => config,
        }
    }
}

impl CalcArgs {
    /// Reading built from the concentrations given on the command line
    pub fn reading(&self) -> PollutantReading {
        [
            (Pollutant::Pm10, self.pm10),
            (Pollutant::So2, self.so2),
            (Pollutant::Co, self.co),
            (Pollutant::O3, self.o3),
            (Pollutant::No2, self.no2),
        ]
        .into_iter()
        .filter_map(|(pollutant, value)| value.map(|v| (pollutant, v)))
        .collect()
    }

    /// Validate the command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        for (pollutant, value) in self.reading().iter() {
            if !value.is_finite() {
                return Err(Error::configuration(format!(
                    "{} concentration must be a finite number",
                    pollutant
                )));
            }
        }
        Ok(())
    }
}

fn ensure_file(path: &std::path::Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::configuration(format!(
            "Input file does not exist: {}",
            path.display()
        )));
    }

    if !path.is_file() {
        return Err(Error::configuration(format!(
            "Input path is not a file: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_log_level() {
        let args = Args::try_parse_from(["ispu-processor", "-vv", "calc"]).unwrap();
        assert_eq!(args.get_log_level(), "debug");

        let args = Args::try_parse_from(["ispu-processor", "calc", "-q"]).unwrap();
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());

        let args = Args::try_parse_from(["ispu-processor"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.get_log_level(), "warn");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["ispu-processor", "-q", "-v", "calc"]).is_err());
    }

    #[test]
    fn test_validate_args_parsing() {
        let args = Args::try_parse_from([
            "ispu-processor",
            "validate",
            "upload.csv",
            "--schema",
            "meteorology",
            "--any-order",
        ])
        .unwrap();

        let Some(Commands::Validate(validate)) = args.command else {
            panic!("expected validate command");
        };
        assert_eq!(validate.schema, HeaderSchema::Meteorology);

        let config = validate.ingest_config();
        assert!(!config.enforce_order);
        assert_eq!(config.max_rows, Some(7));
    }

    #[test]
    fn test_index_args_defaults_and_overrides() {
        let args =
            Args::try_parse_from(["ispu-processor", "index", "a.csv", "b.csv", "--format", "json"])
                .unwrap();
        let Some(Commands::Index(index)) = args.command else {
            panic!("expected index command");
        };

        assert_eq!(index.files.len(), 2);
        assert_eq!(index.schema, HeaderSchema::Pollutants);
        assert_eq!(index.output_format, OutputFormat::Json);
        assert!(index.ingest_config().enforce_order);
        assert_eq!(index.ingest_config().max_rows, None);

        let args = Args::try_parse_from(["ispu-processor", "index", "a.csv", "--max-rows", "30"])
            .unwrap();
        let Some(Commands::Index(index)) = args.command else {
            panic!("expected index command");
        };
        assert_eq!(index.ingest_config().max_rows, Some(30));

        assert!(Args::try_parse_from(["ispu-processor", "index"]).is_err());
    }

    #[test]
    fn test_index_args_validation() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Tanggal,PM10,SO2,CO,O3,NO2").unwrap();

        let mut args = IndexArgs {
            files: vec![file.path().to_path_buf()],
            schema: HeaderSchema::Pollutants,
            any_order: false,
            max_rows: None,
            output_format: OutputFormat::Human,
            output_file: None,
        };
        assert!(args.validate().is_ok());

        args.max_rows = Some(0);
        assert!(args.validate().is_err());

        args.max_rows = None;
        args.schema = HeaderSchema::Meteorology;
        assert!(args.validate().is_err());

        args.schema = HeaderSchema::Full;
        args.files.push(PathBuf::from("/nonexistent/upload.csv"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_calc_args_reading() {
        let args = Args::try_parse_from([
            "ispu-processor",
            "calc",
            "--pm10",
            "27",
            "--so2",
            "85",
            "--no2",
            "-1",
        ])
        .unwrap();
        let Some(Commands::Calc(calc)) = args.command else {
            panic!("expected calc command");
        };

        let reading = calc.reading();
        assert_eq!(reading.len(), 3);
        assert_eq!(reading.get(Pollutant::So2), Some(85.0));
        assert_eq!(reading.get(Pollutant::No2), Some(-1.0));
        assert_eq!(reading.get(Pollutant::Co), None);
        assert!(calc.validate().is_ok());
    }
}
