//! Residual diagnostics for fitted candidate models.
//!
//! A candidate is only acceptable when its residuals look like white noise:
//! no significant autocorrelation remains at any tested lag.

use crate::error::{AnalysisError, Result};
use crate::utils::stats::autocorrelation;
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Ljung-Box portmanteau test result.
#[derive(Debug, Clone)]
pub struct PortmanteauTest {
    /// Q statistic.
    pub statistic: f64,
    /// P-value from the chi-squared distribution with `df` degrees of freedom.
    pub p_value: f64,
    /// Number of lags tested.
    pub lags: usize,
    /// Degrees of freedom (lags minus fitted parameters, at least 1).
    pub df: usize,
}

impl PortmanteauTest {
    /// True when we fail to reject the null of independent residuals.
    pub fn is_white_noise(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}

/// Ljung-Box test for autocorrelation in residuals.
///
/// Tests the null hypothesis that the residuals are independently
/// distributed. `fitted_params` adjusts the degrees of freedom for the
/// number of parameters the model estimated.
pub fn ljung_box(
    residuals: &[f64],
    lags: Option<usize>,
    fitted_params: usize,
) -> Result<PortmanteauTest> {
    let n = residuals.len();
    if n < 3 {
        return Err(AnalysisError::InsufficientData { needed: 3, got: n });
    }

    let lags = lags
        .unwrap_or_else(|| 10.min(n / 5).max(1))
        .clamp(1, n - 1);

    let mut q = 0.0;
    for k in 1..=lags {
        let r = autocorrelation(residuals, k);
        q += r * r / (n - k) as f64;
    }
    q *= n as f64 * (n as f64 + 2.0);

    let df = lags.saturating_sub(fitted_params).max(1);

    let chi = ChiSquared::new(df as f64)
        .map_err(|e| AnalysisError::ComputationError(e.to_string()))?;
    let p_value = 1.0 - chi.cdf(q);

    Ok(PortmanteauTest {
        statistic: q,
        p_value,
        lags,
        df,
    })
}

/// Sample autocorrelations of residuals at lags `1..=max_lag`.
///
/// Lags at or beyond the residual length come back as NaN.
pub fn residual_acf(residuals: &[f64], max_lag: usize) -> Vec<f64> {
    (1..=max_lag)
        .map(|k| autocorrelation(residuals, k))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternating(n: usize) -> Vec<f64> {
        (0..n).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect()
    }

    #[test]
    fn white_noise_residuals_pass() {
        let residuals: Vec<f64> = (0..100)
            .map(|i| ((i * 31 + 7) % 89) as f64 / 44.5 - 1.0)
            .collect();

        let result = ljung_box(&residuals, Some(10), 0).unwrap();

        assert!(result.statistic >= 0.0);
        assert!(result.is_white_noise(0.05));
    }

    #[test]
    fn strongly_autocorrelated_residuals_fail() {
        let result = ljung_box(&alternating(80), Some(10), 0).unwrap();

        assert!(!result.is_white_noise(0.05));
        assert!(result.p_value < 0.01);
    }

    #[test]
    fn degrees_of_freedom_account_for_fitted_params() {
        let residuals: Vec<f64> = (0..50).map(|i| ((i * 13) % 23) as f64 - 11.0).collect();

        let unadjusted = ljung_box(&residuals, Some(8), 0).unwrap();
        let adjusted = ljung_box(&residuals, Some(8), 3).unwrap();

        assert_eq!(unadjusted.df, 8);
        assert_eq!(adjusted.df, 5);
    }

    #[test]
    fn df_never_drops_below_one() {
        let residuals: Vec<f64> = (0..50).map(|i| ((i * 13) % 23) as f64 - 11.0).collect();
        let result = ljung_box(&residuals, Some(2), 5).unwrap();
        assert_eq!(result.df, 1);
    }

    #[test]
    fn constant_residuals_trivially_pass() {
        let result = ljung_box(&[0.0; 30], Some(5), 0).unwrap();
        assert_eq!(result.statistic, 0.0);
        assert!(result.is_white_noise(0.05));
    }

    #[test]
    fn too_few_residuals_is_an_error() {
        assert!(matches!(
            ljung_box(&[0.1, -0.1], None, 0),
            Err(AnalysisError::InsufficientData { .. })
        ));
    }

    #[test]
    fn acf_returns_one_value_per_lag() {
        let residuals = alternating(20);
        let acf = residual_acf(&residuals, 5);

        assert_eq!(acf.len(), 5);
        assert!(acf[0] < 0.0); // lag 1 of an alternating series
        assert!(acf[1] > 0.0); // lag 2 back in phase
    }

    #[test]
    fn acf_beyond_series_length_is_nan() {
        let acf = residual_acf(&[1.0, 2.0, 3.0], 4);
        assert!(acf[3].is_nan());
    }
}
