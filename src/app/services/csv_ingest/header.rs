//! Header contract validation
//!
//! Compares an observed header row against a fixed expected schema. Column
//! names are compared exactly: case, accents and inner spacing all matter.

use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Difference between an observed and an expected column set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderDiff {
    /// Expected columns absent from the observed header
    pub missing: Vec<String>,

    /// Observed columns not in the expected schema
    pub extra: Vec<String>,
}

impl HeaderDiff {
    /// Whether both sides hold the same set of columns
    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Order-preserving set differences between observed and expected columns
pub fn compare_headers<O, E>(observed: &[O], expected: &[E]) -> HeaderDiff
where
    O: AsRef<str>,
    E: AsRef<str>,
{
    let observed_set: HashSet<&str> = observed.iter().map(AsRef::as_ref).collect();
    let expected_set: HashSet<&str> = expected.iter().map(AsRef::as_ref).collect();

    HeaderDiff {
        missing: ordered_difference(expected, &observed_set),
        extra: ordered_difference(observed, &expected_set),
    }
}

/// Validate an observed header against the expected schema
///
/// Fails with `SchemaMismatch` when the column sets differ. When
/// `enforce_order` is set and the sets match, also fails with
/// `OrderMismatch` unless the sequences are identical.
pub fn validate_header<O, E>(observed: &[O], expected: &[E], enforce_order: bool) -> Result<()>
where
    O: AsRef<str>,
    E: AsRef<str>,
{
    let diff = compare_headers(observed, expected);
    if !diff.is_match() {
        return Err(Error::schema_mismatch(diff.missing, diff.extra));
    }

    if enforce_order {
        let same_sequence = observed.len() == expected.len()
            && observed
                .iter()
                .zip(expected.iter())
                .all(|(o, e)| o.as_ref() == e.as_ref());

        if !same_sequence {
            return Err(Error::order_mismatch(
                to_owned_columns(expected),
                to_owned_columns(observed),
            ));
        }
    }

    Ok(())
}

fn ordered_difference<S: AsRef<str>>(columns: &[S], exclude: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    columns
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| !exclude.contains(c) && seen.insert(*c))
        .map(str::to_string)
        .collect()
}

fn to_owned_columns<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    columns.iter().map(|c| c.as_ref().to_string()).collect()
}
