//! Centered moving-average smoothing.
//!
//! Periodic zero-reporting (weekends, holidays) is offset by replacing each
//! observation with the mean of a window centered on it. Centering keeps the
//! smoothed series in phase with the raw one; a trailing window would lag it.

use crate::core::TimeSeries;
use crate::error::{AnalysisError, Result};

/// Smooth a series with a centered moving average of half-width `half_window`.
///
/// `out[i]` is the mean of `values[i - w ..= i + w]` when the full window
/// exists. Boundary points with an incomplete window are undefined (NaN) and
/// stay undefined downstream; they are never imputed or defaulted. A window
/// containing an undefined observation is itself undefined.
pub fn centered_moving_average(series: &TimeSeries, half_window: usize) -> Result<TimeSeries> {
    if half_window == 0 {
        return Err(AnalysisError::InvalidParameter(
            "half_window must be positive".to_string(),
        ));
    }

    let values = series.values();
    let n = values.len();
    let width = 2 * half_window + 1;

    let mut smoothed = vec![f64::NAN; n];
    if n >= width {
        for i in half_window..(n - half_window) {
            let window = &values[i - half_window..=i + half_window];
            smoothed[i] = window.iter().sum::<f64>() / width as f64;
        }
    }

    series.with_values(smoothed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone, Utc};

    fn series(values: Vec<f64>) -> TimeSeries {
        let base = Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap();
        let timestamps = (0..values.len())
            .map(|i| base + Duration::days(i as i64))
            .collect();
        TimeSeries::new(timestamps, values).unwrap()
    }

    #[test]
    fn interior_values_are_window_means() {
        let ts = series(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);

        let smoothed = centered_moving_average(&ts, 1).unwrap();
        let out = smoothed.values();

        // Window of 3 centered on each interior point.
        assert_relative_eq!(out[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(out[3], 4.0, epsilon = 1e-12);
        assert_relative_eq!(out[5], 6.0, epsilon = 1e-12);
    }

    #[test]
    fn boundaries_are_undefined() {
        let ts = series(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);

        let smoothed = centered_moving_average(&ts, 3).unwrap();
        let out = smoothed.values();

        for i in 0..3 {
            assert!(out[i].is_nan());
        }
        for i in 5..8 {
            assert!(out[i].is_nan());
        }
        assert_relative_eq!(out[3], 4.0, epsilon = 1e-12);
        assert_relative_eq!(out[4], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn series_shorter_than_window_is_all_undefined() {
        let ts = series(vec![1.0, 2.0, 3.0]);
        let smoothed = centered_moving_average(&ts, 2).unwrap();
        assert!(smoothed.values().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn undefined_input_poisons_its_windows() {
        let ts = series(vec![1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0]);

        let smoothed = centered_moving_average(&ts, 1).unwrap();
        let out = smoothed.values();

        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert!(out[3].is_nan());
        assert_relative_eq!(out[4], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_half_window_is_an_error() {
        let ts = series(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            centered_moving_average(&ts, 0),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn smoothing_absorbs_periodic_zeros() {
        // Constant 100 with every 7th observation zeroed by reporting gaps.
        let values: Vec<f64> = (0..30)
            .map(|i| if i % 7 == 0 { 0.0 } else { 100.0 })
            .collect();
        let ts = series(values);

        let smoothed = centered_moving_average(&ts, 3).unwrap();

        // Every full window spans seven days and therefore exactly one zero.
        for &v in &smoothed.values()[3..27] {
            assert_relative_eq!(v, 600.0 / 7.0, epsilon = 1e-9);
            assert!(v >= 70.0);
        }
    }

    #[test]
    fn preserves_timestamps() {
        let ts = series(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let smoothed = centered_moving_average(&ts, 1).unwrap();
        assert_eq!(smoothed.timestamps(), ts.timestamps());
    }
}
