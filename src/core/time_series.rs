//! TimeSeries data structure for daily observation data.

use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Utc};

/// An ordered univariate time series.
///
/// Timestamps are strictly increasing and aligned one-to-one with values.
/// Undefined observations are represented as `f64::NAN` and propagate through
/// derived series; they are never coerced to zero or silently imputed.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a new time series.
    ///
    /// # Errors
    /// Returns `TimestampError` if timestamps are not strictly increasing, or
    /// `LengthMismatch` if the two vectors differ in length.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        for pair in timestamps.windows(2) {
            if pair[1] <= pair[0] {
                return Err(AnalysisError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(Self { timestamps, values })
    }

    /// Construct from components already known to satisfy the invariants.
    ///
    /// Used internally by stages that derive a subsequence or re-value an
    /// existing series without re-validating.
    pub(crate) fn from_validated(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Self {
        debug_assert_eq!(timestamps.len(), values.len());
        Self { timestamps, values }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get the timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get the values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the observation at an index, if it exists.
    pub fn get(&self, index: usize) -> Option<(DateTime<Utc>, f64)> {
        Some((*self.timestamps.get(index)?, *self.values.get(index)?))
    }

    /// Iterate over (timestamp, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// First timestamp, if the series is non-empty.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.timestamps.first().copied()
    }

    /// Last timestamp, if the series is non-empty.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }

    /// Extract a contiguous slice of the series by index range.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(AnalysisError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(AnalysisError::InvalidParameter(format!(
                "slice end {} exceeds series length {}",
                end,
                self.len()
            )));
        }
        Ok(Self::from_validated(
            self.timestamps[start..end].to_vec(),
            self.values[start..end].to_vec(),
        ))
    }

    /// Return a copy with the same timestamps and new values.
    ///
    /// # Errors
    /// Returns `LengthMismatch` if `values` does not align with the series.
    pub fn with_values(&self, values: Vec<f64>) -> Result<TimeSeries> {
        if values.len() != self.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: self.len(),
                got: values.len(),
            });
        }
        Ok(Self::from_validated(self.timestamps.clone(), values))
    }

    /// Check whether any observation is undefined (NaN).
    pub fn has_undefined(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Return a copy with undefined observations dropped.
    ///
    /// Dropping preserves order, so the result still satisfies the
    /// strictly-increasing timestamp invariant.
    pub fn defined(&self) -> TimeSeries {
        let (timestamps, values) = self
            .iter()
            .filter(|(_, v)| !v.is_nan())
            .unzip();
        Self::from_validated(timestamps, values)
    }
}
