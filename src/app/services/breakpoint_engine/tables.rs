//! Breakpoint segments and the fixed ISPU tables
//!
//! Each pollutant has one ordered list of segments mapping a concentration
//! range onto an index range. The standard tables are built once from the
//! anchors in [`crate::constants`] and shared for the life of the process.

use crate::app::models::Pollutant;
use crate::constants::{ISPU_INDEX_ANCHORS, concentration_anchors};
use crate::{Error, Result};
use serde::Serialize;
use std::sync::OnceLock;

/// One linear interpolation interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakpointSegment {
    pub c_low: f64,
    pub c_high: f64,
    pub i_low: u32,
    pub i_high: u32,
}

impl BreakpointSegment {
    /// Whether a concentration falls inside this segment (both bounds inclusive)
    pub fn contains(&self, concentration: f64) -> bool {
        concentration >= self.c_low && concentration <= self.c_high
    }

    /// Zero-width concentration range; interpolation would divide by zero
    pub fn is_degenerate(&self) -> bool {
        self.c_high == self.c_low
    }
}

/// Ordered breakpoint segments for one pollutant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakpointTable {
    pollutant: Pollutant,
    segments: Vec<BreakpointSegment>,
}

impl BreakpointTable {
    /// Create a table from explicit segments, checking the partition invariant
    pub fn new(pollutant: Pollutant, segments: Vec<BreakpointSegment>) -> Result<Self> {
        let table = Self {
            pollutant,
            segments,
        };
        table.validate()?;
        Ok(table)
    }

    /// Build segments from paired concentration and index anchors
    fn from_anchors(pollutant: Pollutant, concentrations: &[f64; 6], indices: &[u32; 6]) -> Self {
        let segments = concentrations
            .windows(2)
            .zip(indices.windows(2))
            .map(|(c, i)| BreakpointSegment {
                c_low: c[0],
                c_high: c[1],
                i_low: i[0],
                i_high: i[1],
            })
            .collect();

        Self {
            pollutant,
            segments,
        }
    }

    pub fn pollutant(&self) -> Pollutant {
        self.pollutant
    }

    /// Segments in ascending concentration order
    pub fn segments(&self) -> &[BreakpointSegment] {
        &self.segments
    }

    /// Highest index the table can produce
    pub fn max_index(&self) -> u32 {
        self.segments.last().map(|s| s.i_high).unwrap_or(0)
    }

    /// Upper concentration bound of the last segment
    pub fn max_concentration(&self) -> f64 {
        self.segments.last().map(|s| s.c_high).unwrap_or(0.0)
    }

    /// Check that segments start at zero, are well-formed and contiguous
    pub fn validate(&self) -> Result<()> {
        let first = self.segments.first().ok_or_else(|| {
            Error::configuration(format!("Breakpoint table for {} is empty", self.pollutant))
        })?;

        if first.c_low != 0.0 {
            return Err(Error::configuration(format!(
                "Breakpoint table for {} must start at concentration 0, starts at {}",
                self.pollutant, first.c_low
            )));
        }

        for (position, segment) in self.segments.iter().enumerate() {
            let malformed = segment.c_low.is_nan()
                || segment.c_high.is_nan()
                || segment.c_low > segment.c_high
                || segment.i_low > segment.i_high;
            if malformed {
                return Err(Error::configuration(format!(
                    "Breakpoint segment {} for {} is not increasing",
                    position, self.pollutant
                )));
            }
        }

        for (position, pair) in self.segments.windows(2).enumerate() {
            if pair[0].c_high != pair[1].c_low || pair[0].i_high != pair[1].i_low {
                return Err(Error::configuration(format!(
                    "Breakpoint segments {} and {} for {} are not contiguous",
                    position,
                    position + 1,
                    self.pollutant
                )));
            }
        }

        Ok(())
    }
}

/// The complete set of tables, one per pollutant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakpointTables {
    tables: [BreakpointTable; 5],
}

static STANDARD_TABLES: OnceLock<BreakpointTables> = OnceLock::new();

impl BreakpointTables {
    /// National ISPU tables (24-hour averages, µg/m³)
    pub fn standard() -> &'static BreakpointTables {
        STANDARD_TABLES.get_or_init(|| BreakpointTables {
            tables: [
                BreakpointTable::from_anchors(
                    Pollutant::Pm10,
                    &concentration_anchors::PM10,
                    &ISPU_INDEX_ANCHORS,
                ),
                BreakpointTable::from_anchors(
                    Pollutant::So2,
                    &concentration_anchors::SO2,
                    &ISPU_INDEX_ANCHORS,
                ),
                BreakpointTable::from_anchors(
                    Pollutant::Co,
                    &concentration_anchors::CO,
                    &ISPU_INDEX_ANCHORS,
                ),
                BreakpointTable::from_anchors(
                    Pollutant::O3,
                    &concentration_anchors::O3,
                    &ISPU_INDEX_ANCHORS,
                ),
                BreakpointTable::from_anchors(
                    Pollutant::No2,
                    &concentration_anchors::NO2,
                    &ISPU_INDEX_ANCHORS,
                ),
            ],
        })
    }

    /// Table for a pollutant
    pub fn get(&self, pollutant: Pollutant) -> &BreakpointTable {
        // Slots follow the canonical declaration order of Pollutant
        &self.tables[pollutant as usize]
    }

    /// All tables in canonical pollutant order
    pub fn iter(&self) -> impl Iterator<Item = &BreakpointTable> {
        self.tables.iter()
    }
}
