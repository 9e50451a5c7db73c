//! Forecast result structure for holding predictions.

use crate::error::{AnalysisError, Result};

/// Point forecasts for a horizon, with optional prediction interval bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    point: Vec<f64>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
}

impl Forecast {
    /// Create a forecast from point predictions only.
    pub fn from_point(point: Vec<f64>) -> Self {
        Self {
            point,
            lower: None,
            upper: None,
        }
    }

    /// Create a forecast with prediction intervals.
    ///
    /// # Errors
    /// Returns `LengthMismatch` if the bound vectors do not align with the
    /// point predictions.
    pub fn with_intervals(point: Vec<f64>, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != point.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: point.len(),
                got: lower.len(),
            });
        }
        if upper.len() != point.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: point.len(),
                got: upper.len(),
            });
        }
        Ok(Self {
            point,
            lower: Some(lower),
            upper: Some(upper),
        })
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    /// Check if the forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Point predictions.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// Lower interval bounds, if present.
    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    /// Upper interval bounds, if present.
    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }

    /// Check whether both interval bounds are present.
    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }
}
