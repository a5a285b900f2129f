//! Breakpoint index engine for ISPU calculation
//!
//! Converts raw pollutant concentrations into standardized sub-indices by
//! piecewise-linear interpolation against the national breakpoint tables,
//! then combines sub-indices into one aggregate index per observation.
//!
//! ## Architecture
//!
//! - [`tables`] - Breakpoint segments and the fixed per-pollutant tables
//! - [`engine`] - Sub-index interpolation and aggregation across pollutants
//!
//! ## Boundary policy
//!
//! Negative or absent concentrations clamp to zero. Concentrations above the
//! last segment saturate at the table's maximum index instead of
//! extrapolating. An observation with no pollutant present yields an
//! explicit "no data" aggregate, never an index of 0.
//!
//! ## Usage
//!
//! ```rust
//! use ispu_processor::app::services::breakpoint_engine::{BreakpointTables, aggregate};
//! use ispu_processor::{Pollutant, PollutantReading};
//!
//! let reading = PollutantReading::new()
//!     .with(Pollutant::Pm10, 75.0)
//!     .with(Pollutant::O3, 100.0);
//!
//! let result = aggregate(&reading, BreakpointTables::standard());
//! assert_eq!(result.dominant, Some(Pollutant::Pm10));
//! ```

pub mod engine;
pub mod tables;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use engine::{SubIndexResult, aggregate, sub_index, sub_index_detailed};
pub use tables::{BreakpointSegment, BreakpointTable, BreakpointTables};
