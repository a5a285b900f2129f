//! Data models for ISPU processing
//!
//! This module contains the core data structures for representing pollutant
//! readings, index results and tokenized CSV tables.

use crate::constants::category_bounds;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Pollutants
// =============================================================================

/// Pollutants covered by the ISPU standard
///
/// Declaration order is the canonical order: it drives iteration, the
/// ordering of sub-index maps and tie-breaking for the dominant pollutant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "O3")]
    O3,
    #[serde(rename = "NO2")]
    No2,
}

impl Pollutant {
    /// All pollutants in canonical order
    pub const ALL: [Pollutant; 5] = [
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::O3,
        Pollutant::No2,
    ];

    /// Column name used in uploads and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Pollutant::Pm10 => "PM10",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
            Pollutant::No2 => "NO2",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pollutant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Pollutant::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| Error::unknown_pollutant(s))
    }
}

// =============================================================================
// Pollutant Reading
// =============================================================================

/// Pollutant concentrations for a single time point
///
/// Absent pollutants are simply not in the map. Values are stored as given;
/// negatives are clamped to zero when the index is computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollutantReading {
    values: BTreeMap<Pollutant, f64>,
}

impl PollutantReading {
    /// Create an empty reading
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a concentration, builder style
    pub fn with(mut self, pollutant: Pollutant, value: f64) -> Self {
        self.set(pollutant, value);
        self
    }

    /// Set a concentration
    pub fn set(&mut self, pollutant: Pollutant, value: f64) {
        self.values.insert(pollutant, value);
    }

    /// Concentration for a pollutant, if present
    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        self.values.get(&pollutant).copied()
    }

    /// Whether no pollutant is present
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of pollutants present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Present concentrations in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        self.values.iter().map(|(p, v)| (*p, *v))
    }
}

impl FromIterator<(Pollutant, f64)> for PollutantReading {
    fn from_iter<I: IntoIterator<Item = (Pollutant, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Index Results
// =============================================================================

/// Health category bands for an aggregate index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Unhealthy")]
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    #[serde(rename = "Hazardous")]
    Hazardous,
}

impl Category {
    /// Category for an aggregate index value
    pub fn from_index(index: u32) -> Self {
        if index <= category_bounds::GOOD {
            Category::Good
        } else if index <= category_bounds::MODERATE {
            Category::Moderate
        } else if index <= category_bounds::UNHEALTHY {
            Category::Unhealthy
        } else if index <= category_bounds::VERY_UNHEALTHY {
            Category::VeryUnhealthy
        } else {
            Category::Hazardous
        }
    }

    /// English label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Moderate => "Moderate",
            Category::Unhealthy => "Unhealthy",
            Category::VeryUnhealthy => "Very Unhealthy",
            Category::Hazardous => "Hazardous",
        }
    }

    /// Indonesian label as printed on ISPU bulletins
    pub fn indonesian_label(&self) -> &'static str {
        match self {
            Category::Good => "Baik",
            Category::Moderate => "Sedang",
            Category::Unhealthy => "Tidak Sehat",
            Category::VeryUnhealthy => "Sangat Tidak Sehat",
            Category::Hazardous => "Berbahaya",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate index for one observation
///
/// `index`, `dominant` and `category` are either all set or all unset; the
/// unset state means no pollutant was present and must not be read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateIndex {
    pub index: Option<u32>,
    pub dominant: Option<Pollutant>,
    pub category: Option<Category>,
    pub sub_indices: BTreeMap<Pollutant, u32>,
}

impl AggregateIndex {
    /// Result for an observation with no pollutant present
    pub fn no_data() -> Self {
        Self::default()
    }

    /// Whether any pollutant contributed to this result
    pub fn has_data(&self) -> bool {
        self.index.is_some()
    }
}

// =============================================================================
// CSV Table
// =============================================================================

/// Tokenized delimited text: header row plus data rows, all as strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub data: Vec<Vec<String>>,
}

impl CsvTable {
    /// Whether the table has neither header nor data
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.data.is_empty()
    }

    /// Position of a header column
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.header.iter().position(|h| h == column)
    }

    /// Field of a data row by column name; None when the column or field is missing
    pub fn field(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.data.get(row)?.get(index).map(String::as_str)
    }

    /// Header-to-field mapping for a data row
    ///
    /// Short rows map only the columns they have; surplus fields are dropped.
    pub fn row_map(&self, row: usize) -> Option<HashMap<String, String>> {
        let fields = self.data.get(row)?;
        Some(
            self.header
                .iter()
                .zip(fields.iter())
                .map(|(h, v)| (h.clone(), v.clone()))
                .collect(),
        )
    }
}
