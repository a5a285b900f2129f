//! Application constants for ISPU processor
//!
//! This module contains the regulatory breakpoint anchors, header contracts,
//! category thresholds and default values used throughout the processor.

// =============================================================================
// ISPU Breakpoint Anchors
// =============================================================================

/// Index scale anchors shared by every pollutant table
pub const ISPU_INDEX_ANCHORS: [u32; 6] = [0, 50, 100, 200, 300, 500];

/// Concentration anchors in µg/m³ (24-hour), Permen LHK P.14/2020
///
/// Each array pairs element-wise with [`ISPU_INDEX_ANCHORS`]; consecutive
/// anchors form one interpolation segment.
pub mod concentration_anchors {
    pub const PM10: [f64; 6] = [0.0, 50.0, 150.0, 350.0, 420.0, 500.0];
    pub const SO2: [f64; 6] = [0.0, 52.0, 180.0, 400.0, 800.0, 1200.0];
    pub const CO: [f64; 6] = [0.0, 4000.0, 8000.0, 15000.0, 30000.0, 45000.0];
    pub const O3: [f64; 6] = [0.0, 120.0, 235.0, 400.0, 800.0, 1000.0];
    pub const NO2: [f64; 6] = [0.0, 80.0, 200.0, 1130.0, 2260.0, 3000.0];
}

// =============================================================================
// Category Thresholds
// =============================================================================

/// Upper bounds (inclusive) of the category bands; anything above is hazardous
pub mod category_bounds {
    pub const GOOD: u32 = 50;
    pub const MODERATE: u32 = 100;
    pub const UNHEALTHY: u32 = 200;
    pub const VERY_UNHEALTHY: u32 = 300;
}

// =============================================================================
// Header Contracts
// =============================================================================

/// Date label column, treated as an opaque string
pub const DATE_COLUMN: &str = "Tanggal";

/// Full upload schema: pollutants followed by meteorology
pub const FULL_HEADERS: &[&str] = &[
    "Tanggal",
    "PM10",
    "SO2",
    "CO",
    "O3",
    "NO2",
    "Temperatur",
    "Kelembapan",
    "Curah Hujan",
    "Penyinaran Matahari",
    "Kecepatan Angin",
];

/// Meteorology-only schema used for prediction inputs
pub const METEOROLOGY_HEADERS: &[&str] = &[
    "Tanggal",
    "Temperatur",
    "Kelembapan",
    "Curah Hujan",
    "Penyinaran Matahari",
    "Kecepatan Angin",
];

/// Pollutants-only schema (history payloads and saved predictions)
pub const POLLUTANT_HEADERS: &[&str] = &["Tanggal", "PM10", "SO2", "CO", "O3", "NO2"];

/// Meteorology value columns (everything in the meteorology schema but the date)
pub const METEOROLOGY_VALUE_COLUMNS: &[&str] = &[
    "Temperatur",
    "Kelembapan",
    "Curah Hujan",
    "Penyinaran Matahari",
    "Kecepatan Angin",
];

// =============================================================================
// Ingestion Defaults
// =============================================================================

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Quote character; a doubled quote inside a quoted field is a literal quote
pub const QUOTE_CHAR: char = '"';

/// UTF-8 byte-order mark some spreadsheet tools prepend to exports
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Rows read for the fail-fast header check
pub const HEADER_PREVIEW_ROWS: usize = 1;

/// Maximum days of meteorology accepted for one prediction request
pub const MAX_METEOROLOGY_ROWS: usize = 7;

// =============================================================================
// Export Format
// =============================================================================

/// Decimal places for concentrations in exported CSV
pub const EXPORT_DECIMAL_PLACES: usize = 4;

/// Index columns appended after the pollutant columns on export
pub const EXPORT_INDEX_COLUMNS: &[&str] = &["ISPU", "Dominant", "Category"];
