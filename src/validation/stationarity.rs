//! Unit-root and stationarity tests.
//!
//! Two complementary test families drive the differencing decision: the
//! augmented Dickey-Fuller test (null: unit root present) and the KPSS test
//! (null: level-stationary). A series is differenced until KPSS stops
//! rejecting, then the call is cross-checked with ADF.

use crate::error::{AnalysisError, Result};
use crate::utils::ols::solve_symmetric;

/// Which tail of the test distribution rejects the null hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    /// Reject when the statistic falls below the critical value (ADF).
    Lower,
    /// Reject when the statistic exceeds the critical value (KPSS).
    Upper,
}

/// Critical values at the standard significance levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalValues {
    pub one_pct: f64,
    pub five_pct: f64,
    pub ten_pct: f64,
}

impl CriticalValues {
    /// Critical value for a significance level, snapped to the nearest
    /// tabulated level (1%, 5%, 10%).
    pub fn at(&self, alpha: f64) -> f64 {
        if alpha <= 0.025 {
            self.one_pct
        } else if alpha <= 0.075 {
            self.five_pct
        } else {
            self.ten_pct
        }
    }
}

/// Result of a unit-root or stationarity test.
#[derive(Debug, Clone)]
pub struct UnitRootTest {
    /// Test statistic.
    pub statistic: f64,
    /// Approximate p-value, interpolated from tabulated critical points.
    pub p_value: f64,
    /// Number of lags used.
    pub lags: usize,
    /// Critical values at standard significance levels.
    pub critical_values: CriticalValues,
    /// Rejection direction.
    pub tail: Tail,
}

impl UnitRootTest {
    /// Decide rejection by comparing the statistic against the critical value
    /// at `alpha`.
    ///
    /// This is the statistically valid decision rule; the statistic is never
    /// compared against a p-value.
    pub fn rejects_null(&self, alpha: f64) -> bool {
        let cv = self.critical_values.at(alpha);
        match self.tail {
            Tail::Lower => self.statistic < cv,
            Tail::Upper => self.statistic > cv,
        }
    }
}

// Tabulated (statistic, p-value) knots for interpolation. ADF values follow
// the MacKinnon constant-only case; KPSS values follow the level-stationary
// table, clamped to [0.01, 0.10] as is conventional.
const ADF_P_KNOTS: [(f64, f64); 8] = [
    (-4.0, 0.001),
    (-3.43, 0.01),
    (-2.86, 0.05),
    (-2.57, 0.10),
    (-1.94, 0.30),
    (-1.28, 0.60),
    (0.0, 0.90),
    (1.0, 0.99),
];

const KPSS_P_KNOTS: [(f64, f64); 4] = [
    (0.347, 0.10),
    (0.463, 0.05),
    (0.574, 0.025),
    (0.739, 0.01),
];

/// Piecewise-linear interpolation over (statistic, p) knots, clamped at the
/// table ends.
fn interpolate_p(stat: f64, knots: &[(f64, f64)]) -> f64 {
    let (first_stat, first_p) = knots[0];
    if stat <= first_stat {
        return first_p;
    }
    for pair in knots.windows(2) {
        let (s0, p0) = pair[0];
        let (s1, p1) = pair[1];
        if stat <= s1 {
            let t = (stat - s0) / (s1 - s0);
            return p0 + t * (p1 - p0);
        }
    }
    knots[knots.len() - 1].1
}

/// Augmented Dickey-Fuller test for a unit root.
///
/// Regresses the first difference on the lagged level, an intercept, and
/// `lags` lagged differences; the t-statistic of the lagged-level coefficient
/// is compared against MacKinnon critical values. The null hypothesis is that
/// a unit root is present, so rejection supports stationarity.
///
/// The lag order defaults to `floor((n - 1)^(1/3))`, capped so that enough
/// regression rows remain.
pub fn adf_test(series: &[f64], max_lags: Option<usize>) -> Result<UnitRootTest> {
    let n = series.len();
    if n < 8 {
        return Err(AnalysisError::InsufficientData { needed: 8, got: n });
    }

    let default_lags = ((n - 1) as f64).powf(1.0 / 3.0).floor() as usize;
    let cap = (n - 6) / 2;
    let lags = max_lags.unwrap_or(default_lags).min(cap);

    // dy[i] = series[i + 1] - series[i]
    let dy: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();

    // Rows t = lags + 1 ..= n - 1 (indices into `series`):
    //   dy_t = b0 + rho * y_{t-1} + sum_i gamma_i * dy_{t-i}
    let m = n - 1 - lags;
    let n_params = lags + 2;

    let mut y = Vec::with_capacity(m);
    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(m); lags + 1];
    for t in (lags + 1)..n {
        y.push(dy[t - 1]);
        columns[0].push(series[t - 1]);
        for i in 1..=lags {
            columns[i].push(dy[t - 1 - i]);
        }
    }

    // Normal equations with intercept in slot 0 and rho in slot 1.
    let mut xtx = vec![vec![0.0; n_params]; n_params];
    let mut xty = vec![0.0; n_params];
    for obs in 0..m {
        xtx[0][0] += 1.0;
        xty[0] += y[obs];
        for i in 0..=lags {
            let xi = columns[i][obs];
            xtx[0][i + 1] += xi;
            xtx[i + 1][0] += xi;
            xty[i + 1] += xi * y[obs];
            for j in 0..=lags {
                xtx[i + 1][j + 1] += xi * columns[j][obs];
            }
        }
    }
    for (i, row) in xtx.iter_mut().enumerate() {
        row[i] += 1e-8;
    }

    let beta = solve_symmetric(&xtx, &xty).ok_or_else(|| {
        AnalysisError::ComputationError("ADF regression is degenerate".to_string())
    })?;

    let mut rss = 0.0;
    for obs in 0..m {
        let mut fitted = beta[0];
        for i in 0..=lags {
            fitted += beta[i + 1] * columns[i][obs];
        }
        let e = y[obs] - fitted;
        rss += e * e;
    }

    if m <= n_params {
        return Err(AnalysisError::InsufficientData {
            needed: n_params + lags + 2,
            got: n,
        });
    }
    let sigma_sq = rss / (m - n_params) as f64;

    // Var(rho) = sigma^2 * [(X'X)^{-1}]_{rho,rho}
    let mut unit = vec![0.0; n_params];
    unit[1] = 1.0;
    let inv_col = solve_symmetric(&xtx, &unit).ok_or_else(|| {
        AnalysisError::ComputationError("ADF regression is degenerate".to_string())
    })?;
    let var_rho = sigma_sq * inv_col[1];
    if !(var_rho > 0.0) {
        return Err(AnalysisError::ComputationError(
            "non-positive variance in ADF regression".to_string(),
        ));
    }

    let t_stat = beta[1] / var_rho.sqrt();

    Ok(UnitRootTest {
        statistic: t_stat,
        p_value: interpolate_p(t_stat, &ADF_P_KNOTS),
        lags,
        critical_values: CriticalValues {
            one_pct: -3.43,
            five_pct: -2.86,
            ten_pct: -2.57,
        },
        tail: Tail::Lower,
    })
}

/// KPSS test for level stationarity.
///
/// The null hypothesis is that the series is stationary around a constant
/// level; rejection supports differencing. The long-run variance uses a
/// Bartlett-kernel HAC estimator with `floor(4 * (n/100)^0.25)` lags by
/// default.
pub fn kpss_test(series: &[f64], lags: Option<usize>) -> Result<UnitRootTest> {
    let n = series.len();
    if n < 4 {
        return Err(AnalysisError::InsufficientData { needed: 4, got: n });
    }

    let default_lags = (4.0 * (n as f64 / 100.0).powf(0.25)).floor() as usize;
    let lags = lags.unwrap_or(default_lags).clamp(1, n / 2);

    let mean = series.iter().sum::<f64>() / n as f64;
    let residuals: Vec<f64> = series.iter().map(|&x| x - mean).collect();

    let mut cumsum = Vec::with_capacity(n);
    let mut running = 0.0;
    for &r in &residuals {
        running += r;
        cumsum.push(running);
    }

    let numerator: f64 = cumsum.iter().map(|&s| s * s).sum::<f64>() / (n * n) as f64;

    // Bartlett-weighted long-run variance.
    let mut long_run_var = residuals.iter().map(|&r| r * r).sum::<f64>() / n as f64;
    for j in 1..=lags {
        let weight = 1.0 - j as f64 / (lags + 1) as f64;
        let autocov: f64 = residuals
            .iter()
            .skip(j)
            .zip(residuals.iter())
            .map(|(&a, &b)| a * b)
            .sum::<f64>()
            / n as f64;
        long_run_var += 2.0 * weight * autocov;
    }

    let critical_values = CriticalValues {
        one_pct: 0.739,
        five_pct: 0.463,
        ten_pct: 0.347,
    };

    // Zero long-run variance means a degenerate constant series; it is
    // trivially stationary.
    let statistic = if long_run_var <= 0.0 {
        0.0
    } else {
        numerator / long_run_var
    };

    Ok(UnitRootTest {
        statistic,
        p_value: interpolate_p(statistic, &KPSS_P_KNOTS),
        lags,
        critical_values,
        tail: Tail::Upper,
    })
}
