//! Statistical utility functions.

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the sample variance (n-1 denominator).
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Calculate the sample standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Calculate the autocorrelation at a given lag.
///
/// Uses the biased estimator with the full-sample variance in the
/// denominator, matching the convention of portmanteau test statistics.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    if values.len() <= lag {
        return f64::NAN;
    }
    let m = mean(values);
    let n = values.len();

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for i in 0..n {
        denominator += (values[i] - m).powi(2);
        if i >= lag {
            numerator += (values[i] - m) * (values[i - lag] - m);
        }
    }

    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_of_values() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5, epsilon = 1e-12);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn sample_variance_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(variance(&values), 4.571428571428571, epsilon = 1e-12);
        assert_relative_eq!(std_dev(&values), 4.571428571428571_f64.sqrt(), epsilon = 1e-12);
        assert!(variance(&[1.0]).is_nan());
    }

    #[test]
    fn autocorrelation_lag_zero_is_one() {
        let values = [1.0, 3.0, 2.0, 5.0, 4.0];
        assert_relative_eq!(autocorrelation(&values, 0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn autocorrelation_of_alternating_series_is_negative() {
        let values = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        assert!(autocorrelation(&values, 1) < 0.0);
    }

    #[test]
    fn autocorrelation_beyond_length_is_nan() {
        assert!(autocorrelation(&[1.0, 2.0], 2).is_nan());
    }

    #[test]
    fn autocorrelation_of_constant_series_is_zero() {
        assert_relative_eq!(autocorrelation(&[3.0; 10], 1), 0.0, epsilon = 1e-12);
    }
}
