//! Shared numerical utilities.

pub mod metrics;
pub mod ols;
pub mod stats;

pub use metrics::{accuracy, mae, mse, rmse, AccuracyMetrics};
pub use ols::{least_squares, LeastSquaresFit};
pub use stats::{autocorrelation, mean, std_dev, variance};
