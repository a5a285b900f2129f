//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::app::models::Category;
use crate::cli::args::Args;
use crate::{Error, Result};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct CommandStats {
    /// Number of files read
    pub files_processed: usize,
    /// Number of data rows ingested
    pub rows_processed: usize,
    /// Rows with at least one pollutant present
    pub rows_with_data: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

impl CommandStats {
    /// Share of processed rows that produced an index, as a percentage
    pub fn coverage_rate(&self) -> f64 {
        if self.rows_processed == 0 {
            0.0
        } else {
            (self.rows_with_data as f64 / self.rows_processed as f64) * 100.0
        }
    }
}

/// Set up structured logging for all commands
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ispu_processor={}", log_level)));

    let initialized = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // A subscriber installed earlier in the process keeps precedence
    if initialized.is_err() {
        debug!("Global subscriber already installed; keeping it");
        return Ok(());
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Read an input file as UTF-8 text
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))
}

/// Open the report destination: the given file, or stdout
pub fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
            debug!("Writing report to {}", path.display());
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Category label colored by severity
pub fn colorize_category(category: Category) -> ColoredString {
    let label = category.label();
    match category {
        Category::Good => label.bright_green(),
        Category::Moderate => label.bright_blue(),
        Category::Unhealthy => label.bright_yellow(),
        Category::VeryUnhealthy => label.bright_red(),
        Category::Hazardous => label.red().bold(),
    }
}
