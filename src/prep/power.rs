//! Variance-stabilizing power transform.
//!
//! Count series with growing levels usually show growing variance. A power
//! transform `v -> v^lambda` compresses the large values; the log transform
//! is the limiting case `lambda -> 0`. Because a log is undefined at zero,
//! series containing zeros use the square root instead.

use crate::core::TimeSeries;
use crate::error::{AnalysisError, Result};

/// An invertible power transform with exponent `lambda`.
///
/// `lambda = 0` means the natural log (inverted with `exp`); any positive
/// `lambda` maps `v -> v^lambda` and inverts with `v -> v^(1/lambda)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerTransform {
    lambda: f64,
}

impl PowerTransform {
    /// Create a transform with the given exponent.
    ///
    /// # Errors
    /// Returns `InvalidParameter` for negative or non-finite exponents.
    pub fn new(lambda: f64) -> Result<Self> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "power exponent must be finite and non-negative, got {lambda}"
            )));
        }
        Ok(Self { lambda })
    }

    /// The square-root transform (`lambda = 0.5`).
    pub fn sqrt() -> Self {
        Self { lambda: 0.5 }
    }

    /// The log transform (`lambda = 0`).
    pub fn log() -> Self {
        Self { lambda: 0.0 }
    }

    /// The exponent.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Choose an exponent for a series: square root when the series contains
    /// zeros (log would be undefined there), log otherwise.
    pub fn select(series: &TimeSeries) -> Self {
        let has_zero = series
            .values()
            .iter()
            .any(|&v| !v.is_nan() && v == 0.0);
        if has_zero {
            Self::sqrt()
        } else {
            Self::log()
        }
    }

    /// Transform a single value. Out-of-domain inputs (negative under a
    /// fractional exponent, non-positive under log) come out NaN.
    pub fn apply_value(&self, v: f64) -> f64 {
        if self.lambda == 0.0 {
            if v > 0.0 {
                v.ln()
            } else {
                f64::NAN
            }
        } else {
            v.powf(self.lambda)
        }
    }

    /// Invert a single transformed value.
    pub fn invert_value(&self, v: f64) -> f64 {
        if self.lambda == 0.0 {
            v.exp()
        } else {
            v.powf(1.0 / self.lambda)
        }
    }

    /// Transform a whole series, preserving timestamps. NaN propagates.
    pub fn apply(&self, series: &TimeSeries) -> TimeSeries {
        let values = series.values().iter().map(|&v| self.apply_value(v)).collect();
        TimeSeries::from_validated(series.timestamps().to_vec(), values)
    }

    /// Invert a transformed series, preserving timestamps.
    pub fn invert(&self, series: &TimeSeries) -> TimeSeries {
        let values = series
            .values()
            .iter()
            .map(|&v| self.invert_value(v))
            .collect();
        TimeSeries::from_validated(series.timestamps().to_vec(), values)
    }
}
