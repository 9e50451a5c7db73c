//! Ordinary least squares on a column-major design matrix.
//!
//! Used by the weekday-effect diagnostic (no-intercept regression on
//! indicator columns) and by the unit-root test regressions.

use crate::error::{AnalysisError, Result};

/// Fitted least-squares coefficients.
#[derive(Debug, Clone)]
pub struct LeastSquaresFit {
    /// Intercept term; 0.0 when the model was fitted without one.
    pub intercept: f64,
    /// One coefficient per design column, in input order.
    pub coefficients: Vec<f64>,
}

impl LeastSquaresFit {
    /// Predict fitted values for a set of design columns.
    pub fn predict(&self, columns: &[Vec<f64>]) -> Result<Vec<f64>> {
        if columns.len() != self.coefficients.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: self.coefficients.len(),
                got: columns.len(),
            });
        }
        let n = columns.first().map(|c| c.len()).unwrap_or(0);
        for col in columns {
            if col.len() != n {
                return Err(AnalysisError::LengthMismatch {
                    expected: n,
                    got: col.len(),
                });
            }
        }

        let mut fitted = vec![self.intercept; n];
        for (beta, col) in self.coefficients.iter().zip(columns.iter()) {
            for (f, x) in fitted.iter_mut().zip(col.iter()) {
                *f += beta * x;
            }
        }
        Ok(fitted)
    }
}

/// Fit `y = [intercept +] X @ beta` by solving the normal equations.
///
/// `columns` is the design matrix stored column-major. A tiny ridge term is
/// added to the diagonal so rank-deficient designs (e.g. an indicator column
/// that is all zeros) solve with a near-zero coefficient instead of failing.
pub fn least_squares(
    y: &[f64],
    columns: &[Vec<f64>],
    with_intercept: bool,
) -> Result<LeastSquaresFit> {
    let n = y.len();
    if n == 0 {
        return Err(AnalysisError::EmptyData);
    }
    for col in columns {
        if col.len() != n {
            return Err(AnalysisError::LengthMismatch {
                expected: n,
                got: col.len(),
            });
        }
    }

    let k = columns.len();
    if k == 0 {
        let intercept = if with_intercept {
            y.iter().sum::<f64>() / n as f64
        } else {
            0.0
        };
        return Ok(LeastSquaresFit {
            intercept,
            coefficients: vec![],
        });
    }

    let offset = usize::from(with_intercept);
    let p = k + offset;

    let mut xtx = vec![vec![0.0; p]; p];
    let mut xty = vec![0.0; p];

    for obs in 0..n {
        if with_intercept {
            xtx[0][0] += 1.0;
            xty[0] += y[obs];
            for j in 0..k {
                let xj = columns[j][obs];
                xtx[0][j + 1] += xj;
                xtx[j + 1][0] += xj;
            }
        }
        for i in 0..k {
            let xi = columns[i][obs];
            for j in 0..k {
                xtx[i + offset][j + offset] += xi * columns[j][obs];
            }
            xty[i + offset] += xi * y[obs];
        }
    }

    for (i, row) in xtx.iter_mut().enumerate() {
        row[i] += 1e-8;
    }

    let beta = solve_symmetric(&xtx, &xty).ok_or_else(|| {
        AnalysisError::ComputationError("normal equations not positive definite".to_string())
    })?;

    Ok(LeastSquaresFit {
        intercept: if with_intercept { beta[0] } else { 0.0 },
        coefficients: beta[offset..].to_vec(),
    })
}

/// Solve `A @ x = b` for symmetric positive definite `A` via Cholesky.
pub(crate) fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // A = L @ L'
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }
            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward: L @ y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Backward: L' @ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
