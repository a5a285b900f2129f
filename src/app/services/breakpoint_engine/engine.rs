//! Sub-index interpolation and aggregation
//!
//! Pure functions over the immutable breakpoint tables. Nothing here fails:
//! every concentration maps to some index, and missing data is reported as
//! an explicit "no data" aggregate.

use super::tables::{BreakpointSegment, BreakpointTable, BreakpointTables};
use crate::app::models::{AggregateIndex, Category, Pollutant, PollutantReading};
use std::collections::BTreeMap;
use tracing::trace;

/// Sub-index for one pollutant reading together with the segment used
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubIndexResult {
    pub value: u32,
    pub segment: BreakpointSegment,
}

/// Interpolate a concentration against a table, returning the segment used
///
/// Absent, negative and NaN concentrations are treated as 0. Values past the
/// last segment use that segment and saturate at its upper index.
pub fn sub_index_detailed(value: Option<f64>, table: &BreakpointTable) -> SubIndexResult {
    // f64::max ignores a NaN operand, so NaN clamps to zero too
    let concentration = value.unwrap_or(0.0).max(0.0);
    let segment = select_segment(concentration, table.segments());

    SubIndexResult {
        value: interpolate(concentration, &segment),
        segment,
    }
}

/// Interpolated sub-index for a concentration
pub fn sub_index(value: Option<f64>, table: &BreakpointTable) -> u32 {
    sub_index_detailed(value, table).value
}

/// Combine every present pollutant into one aggregate index
///
/// The aggregate is the maximum sub-index; on a tie the pollutant earliest in
/// canonical order is dominant. With no pollutant present the result is
/// [`AggregateIndex::no_data`].
pub fn aggregate(reading: &PollutantReading, tables: &BreakpointTables) -> AggregateIndex {
    let sub_indices: BTreeMap<Pollutant, u32> = reading
        .iter()
        .map(|(pollutant, value)| (pollutant, sub_index(Some(value), tables.get(pollutant))))
        .collect();

    // BTreeMap iterates in canonical order, so a strict comparison keeps the first maximum
    let dominant = sub_indices
        .iter()
        .fold(None, |best: Option<(Pollutant, u32)>, (&pollutant, &value)| match best {
            Some((_, best_value)) if value <= best_value => best,
            _ => Some((pollutant, value)),
        });

    match dominant {
        Some((pollutant, index)) => {
            trace!(
                "Aggregate index {} dominated by {} across {} pollutants",
                index,
                pollutant,
                sub_indices.len()
            );
            AggregateIndex {
                index: Some(index),
                dominant: Some(pollutant),
                category: Some(Category::from_index(index)),
                sub_indices,
            }
        }
        None => AggregateIndex::no_data(),
    }
}

fn select_segment(concentration: f64, segments: &[BreakpointSegment]) -> BreakpointSegment {
    if let Some(segment) = segments.iter().find(|s| s.contains(concentration)) {
        return *segment;
    }

    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return BreakpointSegment {
            c_low: 0.0,
            c_high: 0.0,
            i_low: 0,
            i_high: 0,
        };
    };

    if concentration < first.c_low { *first } else { *last }
}

fn interpolate(concentration: f64, segment: &BreakpointSegment) -> u32 {
    if segment.is_degenerate() {
        return segment.i_low;
    }

    let i_low = f64::from(segment.i_low);
    let i_high = f64::from(segment.i_high);
    let raw = i_low + (i_high - i_low) / (segment.c_high - segment.c_low)
        * (concentration - segment.c_low);

    // Clamping to the segment's index range is what saturates out-of-range values
    raw.clamp(i_low, i_high).round() as u32
}
