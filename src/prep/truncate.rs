//! Leading-observation truncation.
//!
//! Early near-zero counts destabilize variance estimates, so analysis starts
//! at a cutoff. Truncation is purely a range filter: no interpolation, no
//! reordering.

use crate::core::TimeSeries;
use chrono::{DateTime, Utc};

/// Restrict a series to observations at or after `cutoff`.
pub fn truncate_before(series: &TimeSeries, cutoff: DateTime<Utc>) -> TimeSeries {
    let (timestamps, values) = series.iter().filter(|(t, _)| *t >= cutoff).unzip();
    TimeSeries::from_validated(timestamps, values)
}

/// Find the first timestamp whose value reaches `min_value`.
///
/// Returns `None` when no observation does; undefined observations never
/// qualify.
pub fn onset_cutoff(series: &TimeSeries, min_value: f64) -> Option<DateTime<Utc>> {
    series
        .iter()
        .find(|(_, v)| !v.is_nan() && *v >= min_value)
        .map(|(t, _)| t)
}
