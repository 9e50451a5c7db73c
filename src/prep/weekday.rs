//! Day-of-week collection-bias diagnostic.
//!
//! Case counts reported on weekends and holidays routinely drop to zero even
//! when the underlying process does not. Regressing the series on weekday
//! indicators (no intercept) estimates a mean level per weekday; a pronounced
//! dip on particular days is the signal that smoothing is warranted. The
//! diagnostic never corrects the series itself.

use crate::core::TimeSeries;
use crate::error::{AnalysisError, Result};
use crate::utils::ols::least_squares;
use crate::utils::stats::mean;
use chrono::{Datelike, Weekday};

/// Column order of the indicator matrix: Sunday through Saturday.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// One-hot weekday indicator matrix, row-aligned to a series.
///
/// Exactly one column is 1 in every row; the column is derived from the
/// timestamp's weekday, never from positional arithmetic.
#[derive(Debug, Clone)]
pub struct WeekdayDummies {
    rows: Vec<[f64; 7]>,
}

impl WeekdayDummies {
    /// Build the indicator matrix for a series.
    pub fn from_series(series: &TimeSeries) -> Self {
        let rows = series
            .timestamps()
            .iter()
            .map(|t| {
                let mut row = [0.0; 7];
                row[t.weekday().num_days_from_sunday() as usize] = 1.0;
                row
            })
            .collect();
        Self { rows }
    }

    /// Number of rows (observations).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Indicator rows, Sunday-first column order.
    pub fn rows(&self) -> &[[f64; 7]] {
        &self.rows
    }

    /// The matrix as seven indicator columns (regression layout).
    pub fn columns(&self) -> Vec<Vec<f64>> {
        (0..7)
            .map(|j| self.rows.iter().map(|row| row[j]).collect())
            .collect()
    }

    /// Observation count per weekday column.
    pub fn counts(&self) -> [usize; 7] {
        let mut counts = [0usize; 7];
        for row in &self.rows {
            for (j, &x) in row.iter().enumerate() {
                if x == 1.0 {
                    counts[j] += 1;
                }
            }
        }
        counts
    }
}

/// Estimated mean level per weekday.
#[derive(Debug, Clone)]
pub struct WeekdayEffect {
    /// Mean level per weekday, Sunday-first; NaN for weekdays with no
    /// observations.
    pub means: [f64; 7],
    /// Observation count per weekday, Sunday-first.
    pub counts: [usize; 7],
    grand_mean: f64,
}

impl WeekdayEffect {
    /// Estimated mean for a weekday.
    pub fn mean_for(&self, day: Weekday) -> f64 {
        self.means[day.num_days_from_sunday() as usize]
    }

    /// Weekday with the lowest estimated mean (among observed weekdays).
    pub fn min_day(&self) -> Weekday {
        self.extreme_day(|candidate, best| candidate < best)
    }

    /// Weekday with the highest estimated mean (among observed weekdays).
    pub fn max_day(&self) -> Weekday {
        self.extreme_day(|candidate, best| candidate > best)
    }

    /// Ratio of the lowest weekday mean to the overall mean.
    ///
    /// Values well below 1 indicate systematic under-reporting on the weakest
    /// day and argue for smoothing.
    pub fn relative_dip(&self) -> f64 {
        if self.grand_mean == 0.0 {
            return f64::NAN;
        }
        self.mean_for(self.min_day()) / self.grand_mean
    }

    fn extreme_day(&self, better: impl Fn(f64, f64) -> bool) -> Weekday {
        let mut best = Weekday::Sun;
        let mut best_mean = f64::NAN;
        for (j, &day) in WEEKDAYS.iter().enumerate() {
            if self.counts[j] == 0 {
                continue;
            }
            if best_mean.is_nan() || better(self.means[j], best_mean) {
                best = day;
                best_mean = self.means[j];
            }
        }
        best
    }
}

/// Estimate per-weekday mean levels via a no-intercept regression of the
/// series on its weekday indicators.
///
/// Undefined observations are dropped before the regression. Deterministic
/// for a given series.
pub fn weekday_effect(series: &TimeSeries) -> Result<WeekdayEffect> {
    let defined = series.defined();
    if defined.is_empty() {
        return Err(AnalysisError::EmptyData);
    }

    let dummies = WeekdayDummies::from_series(&defined);
    let counts = dummies.counts();

    let fit = least_squares(defined.values(), &dummies.columns(), false)?;

    let mut means = [f64::NAN; 7];
    for j in 0..7 {
        if counts[j] > 0 {
            means[j] = fit.coefficients[j];
        }
    }

    Ok(WeekdayEffect {
        means,
        counts,
        grand_mean: mean(defined.values()),
    })
}
