//! Test utilities for the breakpoint index engine
//!
//! Shared helpers for building readings and walking the standard tables.

use crate::app::models::{Pollutant, PollutantReading};
use crate::app::services::breakpoint_engine::{BreakpointTable, BreakpointTables};


/// Standard table for a pollutant
pub fn standard_table(pollutant: Pollutant) -> &'static BreakpointTable {
    BreakpointTables::standard().get(pollutant)
}

/// Reading with every pollutant set to the same concentration
pub fn uniform_reading(value: f64) -> PollutantReading {
    Pollutant::ALL.into_iter().map(|p| (p, value)).collect()
}

/// Concentrations from 0 to just past the table maximum in fixed steps
pub fn concentration_sweep(table: &BreakpointTable, steps: usize) -> Vec<f64> {
    let upper = table.max_concentration() * 1.2;
    (0..=steps)
        .map(|i| upper * i as f64 / steps as f64)
        .collect()
}
