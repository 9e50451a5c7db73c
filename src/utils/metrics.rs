//! Accuracy metrics for forecast evaluation.

use crate::error::{AnalysisError, Result};

/// Accuracy metrics between held-out observations and forecasts.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error; `None` when the actuals contain zeros
    /// (count data routinely does).
    pub mape: Option<f64>,
}

/// Calculate accuracy metrics between actual and predicted values.
pub fn accuracy(actual: &[f64], predicted: &[f64]) -> Result<AccuracyMetrics> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(AnalysisError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(AnalysisError::LengthMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let n = actual.len() as f64;

    let mae_val = mae(actual, predicted);
    let mse_val = mse(actual, predicted);

    let mape = if actual.contains(&0.0) {
        None
    } else {
        let sum: f64 = actual
            .iter()
            .zip(predicted.iter())
            .map(|(a, p)| ((a - p) / a).abs())
            .sum();
        Some(100.0 * sum / n)
    };

    Ok(AccuracyMetrics {
        mae: mae_val,
        mse: mse_val,
        rmse: mse_val.sqrt(),
        mape,
    })
}

/// Mean absolute error between two slices.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Mean squared error between two slices.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64
}

/// Root mean squared error between two slices.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}
