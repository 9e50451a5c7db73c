//! Differencing-order selection.
//!
//! The order `d` is chosen by sequential KPSS testing (difference until the
//! stationarity null stops being rejected), then cross-checked with the ADF
//! unit-root test. The two families test opposite null hypotheses, so their
//! agreement is strong evidence; their disagreement is surfaced to the
//! caller rather than resolved automatically.

use crate::core::TimeSeries;
use crate::error::{AnalysisError, Result};
use crate::utils::stats::variance;
use crate::validation::stationarity::{adf_test, kpss_test, UnitRootTest};

/// Apply first-differencing `d` times.
pub fn difference(values: &[f64], d: usize) -> Vec<f64> {
    let mut result = values.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Apply lag-`period` differencing `d` times.
pub fn seasonal_difference(values: &[f64], d: usize, period: usize) -> Vec<f64> {
    if period == 0 {
        return values.to_vec();
    }
    let mut result = values.to_vec();
    for _ in 0..d {
        if result.len() <= period {
            break;
        }
        result = result
            .iter()
            .skip(period)
            .zip(result.iter())
            .map(|(curr, prev)| curr - prev)
            .collect();
    }
    result
}

/// Recommend a seasonal differencing order from the variance reduction of a
/// lag-`period` difference. Returns 0 or 1.
pub fn suggest_seasonal_differencing(values: &[f64], period: usize) -> usize {
    if period < 2 || values.len() < 2 * period {
        return 0;
    }

    let seasonal = seasonal_difference(values, 1, period);
    let orig_var = variance(values);
    let diff_var = variance(&seasonal);

    if orig_var > 0.0 && diff_var < orig_var * 0.7 {
        1
    } else {
        0
    }
}

/// Configuration for differencing-order selection.
#[derive(Debug, Clone)]
pub struct DifferencingConfig {
    /// Seasonal period; values below 2 disable the seasonal step.
    pub seasonal_period: usize,
    /// Maximum non-seasonal differencing order.
    pub max_d: usize,
    /// Significance level for all tests.
    pub alpha: f64,
}

impl Default for DifferencingConfig {
    fn default() -> Self {
        Self {
            seasonal_period: 7,
            max_d: 2,
            alpha: 0.05,
        }
    }
}

impl DifferencingConfig {
    /// Disable the seasonal recommendation step.
    pub fn non_seasonal(mut self) -> Self {
        self.seasonal_period = 0;
        self
    }

    /// Set the seasonal period.
    pub fn with_seasonal_period(mut self, period: usize) -> Self {
        self.seasonal_period = period;
        self
    }

    /// Set the significance level.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Whether the two test families agree on the chosen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestAgreement {
    /// KPSS accepts stationarity after differencing and ADF corroborates.
    Confirmed,
    /// The families disagree; the choice needs manual review.
    Disagreement,
}

/// The selected differencing orders with the evidence behind them.
#[derive(Debug, Clone)]
pub struct DifferencingDecision {
    /// Non-seasonal differencing order.
    pub d: usize,
    /// Seasonal differencing order (0 when no seasonal step ran).
    pub seasonal_d: usize,
    /// Confirmatory KPSS on the fully differenced series (H0: stationary).
    pub confirmatory_kpss: UnitRootTest,
    /// ADF on the series before non-seasonal differencing (H0: unit root).
    pub adf_undifferenced: UnitRootTest,
    /// ADF on the fully differenced series (H0: unit root).
    pub adf_differenced: UnitRootTest,
    /// Cross-family verdict.
    pub agreement: TestAgreement,
}

impl DifferencingDecision {
    /// True when both families support the chosen order.
    pub fn is_confirmed(&self) -> bool {
        self.agreement == TestAgreement::Confirmed
    }
}

/// Select a differencing order for a fully-defined series.
///
/// 1. A variance-ratio seasonal test recommends `D`; seasonal differencing is
///    applied first when recommended.
/// 2. KPSS is run sequentially: while it rejects stationarity and `d < max_d`,
///    another first difference is applied.
/// 3. The final KPSS run is kept as the confirmatory test; failing to reject
///    accepts `d`.
/// 4. ADF cross-validates: rejecting its unit-root null on the differenced
///    series while failing to reject on the undifferenced series (for d >= 1)
///    confirms the order. All rejections compare the statistic to the
///    critical value at `alpha`.
///
/// # Errors
/// `UndefinedValues` when the series still contains NaN observations;
/// `InsufficientData` when a test cannot run on the (shortened) series.
pub fn select_differencing(
    series: &TimeSeries,
    config: &DifferencingConfig,
) -> Result<DifferencingDecision> {
    if series.has_undefined() {
        return Err(AnalysisError::UndefinedValues);
    }
    if series.is_empty() {
        return Err(AnalysisError::EmptyData);
    }

    let seasonal_d = if config.seasonal_period >= 2 {
        suggest_seasonal_differencing(series.values(), config.seasonal_period)
    } else {
        0
    };
    let base = seasonal_difference(series.values(), seasonal_d, config.seasonal_period);

    // Sequential KPSS: difference until stationarity is no longer rejected.
    let mut d = 0;
    let mut working = base.clone();
    let mut kpss = kpss_test(&working, None)?;
    while kpss.rejects_null(config.alpha) && d < config.max_d {
        d += 1;
        working = difference(&working, 1);
        kpss = kpss_test(&working, None)?;
    }

    let adf_undifferenced = adf_test(&base, None)?;
    let adf_differenced = if d == 0 {
        adf_undifferenced.clone()
    } else {
        adf_test(&working, None)?
    };

    let kpss_accepts = !kpss.rejects_null(config.alpha);
    let adf_corroborates = if d == 0 {
        adf_differenced.rejects_null(config.alpha)
    } else {
        adf_differenced.rejects_null(config.alpha)
            && !adf_undifferenced.rejects_null(config.alpha)
    };

    let agreement = if kpss_accepts && adf_corroborates {
        TestAgreement::Confirmed
    } else {
        TestAgreement::Disagreement
    };

    Ok(DifferencingDecision {
        d,
        seasonal_d,
        confirmatory_kpss: kpss,
        adf_undifferenced,
        adf_differenced,
        agreement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn series(values: Vec<f64>) -> TimeSeries {
        let base = Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap();
        let timestamps = (0..values.len())
            .map(|i| base + Duration::days(i as i64))
            .collect();
        TimeSeries::new(timestamps, values).unwrap()
    }

    fn white_noise(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| ((i * 17 + 13) % 97) as f64 / 50.0 - 1.0)
            .collect()
    }

    // ==================== difference ====================

    #[test]
    fn difference_order_0_is_identity() {
        let values = vec![1.0, 2.0, 3.0];
        assert_eq!(difference(&values, 0), values);
    }

    #[test]
    fn difference_order_1() {
        let values = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        assert_eq!(difference(&values, 1), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn difference_order_2_flattens_quadratic() {
        let values = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        assert_eq!(difference(&values, 2), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn seasonal_difference_removes_repeating_pattern() {
        let values = vec![
            100.0, 120.0, 80.0, 90.0, // year 1
            110.0, 130.0, 90.0, 100.0, // year 2
        ];
        assert_eq!(
            seasonal_difference(&values, 1, 4),
            vec![10.0, 10.0, 10.0, 10.0]
        );
    }

    #[test]
    fn seasonal_difference_zero_period_is_identity() {
        let values = vec![1.0, 2.0, 3.0];
        assert_eq!(seasonal_difference(&values, 1, 0), values);
    }

    // ==================== seasonal recommendation ====================

    #[test]
    fn strong_weekly_pattern_recommends_seasonal_differencing() {
        let values: Vec<f64> = (0..70)
            .map(|i| if i % 7 == 0 { 0.0 } else { 100.0 })
            .collect();
        assert_eq!(suggest_seasonal_differencing(&values, 7), 1);
    }

    #[test]
    fn white_noise_needs_no_seasonal_differencing() {
        assert_eq!(suggest_seasonal_differencing(&white_noise(140), 7), 0);
    }

    #[test]
    fn short_series_needs_no_seasonal_differencing() {
        assert_eq!(suggest_seasonal_differencing(&[1.0, 2.0, 3.0], 7), 0);
    }

    // ==================== select_differencing ====================

    #[test]
    fn stationary_series_selects_d_zero() {
        let ts = series(white_noise(120));
        let config = DifferencingConfig::default().non_seasonal();

        let decision = select_differencing(&ts, &config).unwrap();

        assert_eq!(decision.d, 0);
        assert!(!decision.confirmatory_kpss.rejects_null(config.alpha));
    }

    #[test]
    fn chosen_order_is_idempotent_for_stationary_series() {
        let ts = series(white_noise(120));
        let config = DifferencingConfig::default().non_seasonal();

        let decision = select_differencing(&ts, &config).unwrap();

        // Applying the chosen order (0) changes nothing; the verdict holds.
        let redifferenced = difference(ts.values(), decision.d);
        let verdict = kpss_test(&redifferenced, None).unwrap();
        assert!(!verdict.rejects_null(config.alpha));
    }

    #[test]
    fn linear_trend_selects_d_one() {
        let values: Vec<f64> = (0..120)
            .map(|i| i as f64 + ((i * 13 + 5) % 17) as f64 / 17.0)
            .collect();
        let ts = series(values);
        let config = DifferencingConfig::default().non_seasonal();

        let decision = select_differencing(&ts, &config).unwrap();

        assert_eq!(decision.d, 1);
        assert!(!decision.confirmatory_kpss.rejects_null(config.alpha));
    }

    #[test]
    fn trend_selection_is_cross_validated_by_adf() {
        let values: Vec<f64> = (0..150)
            .map(|i| 2.0 * i as f64 + ((i * 13 + 5) % 17) as f64 / 4.0)
            .collect();
        let ts = series(values);
        let config = DifferencingConfig::default().non_seasonal();

        let decision = select_differencing(&ts, &config).unwrap();

        assert_eq!(decision.d, 1);
        // ADF keeps its unit-root null on the trending series and rejects it
        // on the differenced one.
        assert!(!decision.adf_undifferenced.rejects_null(config.alpha));
        assert!(decision.adf_differenced.rejects_null(config.alpha));
        assert!(decision.is_confirmed());
    }

    #[test]
    fn order_is_capped_at_max_d() {
        let values: Vec<f64> = (0..100)
            .map(|i| (i * i) as f64 + ((i * 29 + 7) % 13) as f64 / 13.0)
            .collect();
        let ts = series(values);
        let config = DifferencingConfig {
            seasonal_period: 0,
            max_d: 2,
            alpha: 0.05,
        };

        let decision = select_differencing(&ts, &config).unwrap();
        assert!(decision.d <= 2);
    }

    #[test]
    fn undefined_values_abort_selection() {
        let mut values = white_noise(60);
        values[10] = f64::NAN;
        let ts = series(values);

        assert!(matches!(
            select_differencing(&ts, &DifferencingConfig::default()),
            Err(AnalysisError::UndefinedValues)
        ));
    }

    #[test]
    fn empty_series_aborts_selection() {
        let ts = series(vec![]);
        assert!(matches!(
            select_differencing(&ts, &DifferencingConfig::default()),
            Err(AnalysisError::EmptyData)
        ));
    }

    #[test]
    fn weekly_zero_pattern_triggers_seasonal_step() {
        let values: Vec<f64> = (0..140)
            .map(|i| {
                let base = if i % 7 == 0 { 0.0 } else { 100.0 };
                base + ((i * 13 + 3) % 11) as f64 / 11.0
            })
            .collect();
        let ts = series(values);

        let decision =
            select_differencing(&ts, &DifferencingConfig::default()).unwrap();
        assert_eq!(decision.seasonal_d, 1);
    }
}
