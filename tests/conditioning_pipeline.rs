//! End-to-end tests for the conditioning pipeline on synthetic series with
//! known structure.

use chrono::{DateTime, Duration, TimeZone, Utc, Weekday};
use forecast_lab::pipeline::{condition, ConditioningConfig};
use forecast_lab::prelude::*;
use forecast_lab::prep::{
    centered_moving_average, difference, select_differencing, weekday_effect, DifferencingConfig,
};
use forecast_lab::validation::kpss_test;

/// Daily series starting on Sunday 2020-03-01.
fn daily_series(values: Vec<f64>) -> TimeSeries {
    let base = sunday_start();
    let timestamps = (0..values.len())
        .map(|i| base + Duration::days(i as i64))
        .collect();
    TimeSeries::new(timestamps, values).unwrap()
}

fn sunday_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap()
}

fn white_noise(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| ((i * 17 + 13) % 97) as f64 / 50.0 - 1.0)
        .collect()
}

// =============================================================================
// Scenario: constant level with weekly reporting dropout
// =============================================================================

#[test]
fn weekly_dropout_is_diagnosed_and_smoothed_away() {
    // 30 days at a constant 100, except every 7th observation (a Sunday)
    // is forced to zero by the collection gap.
    let values: Vec<f64> = (0..30)
        .map(|i| if i % 7 == 0 { 0.0 } else { 100.0 })
        .collect();
    let series = daily_series(values);

    // The weekday diagnostic pins the dropout to Sunday.
    let effect = weekday_effect(&series).unwrap();
    assert_eq!(effect.min_day(), Weekday::Sun);
    assert!(effect.mean_for(Weekday::Sun) < 1.0);
    assert!(effect.mean_for(Weekday::Wed) > 99.0);

    // The centered moving average absorbs each induced zero: every full
    // window spans one week and so contains exactly one zero.
    let smoothed = centered_moving_average(&series, 3).unwrap();
    let interior: Vec<f64> = smoothed
        .values()
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .collect();

    assert_eq!(interior.len(), 30 - 6);
    for &v in &interior {
        assert!(v >= 70.0, "smoothed value {v} dipped below 70");
    }

    // Flatter than the raw series: the raw spread is 100, the smoothed
    // interior is constant.
    let max = interior.iter().cloned().fold(f64::MIN, f64::max);
    let min = interior.iter().cloned().fold(f64::MAX, f64::min);
    assert!(max - min < 1e-9);
}

// =============================================================================
// Scenario: linear trend removed by one difference
// =============================================================================

#[test]
fn single_difference_removes_linear_trend() {
    // v[t] = t plus bounded noise.
    let values: Vec<f64> = (0..120)
        .map(|i| i as f64 + ((i * 13 + 5) % 17) as f64 / 17.0)
        .collect();
    let series = daily_series(values);

    let decision = select_differencing(
        &series,
        &DifferencingConfig::default().non_seasonal(),
    )
    .unwrap();
    assert_eq!(decision.d, 1);

    // After one difference the mean no longer grows with t.
    let differenced = difference(series.values(), 1);
    let half = differenced.len() / 2;
    let first_half_mean: f64 =
        differenced[..half].iter().sum::<f64>() / half as f64;
    let second_half_mean: f64 =
        differenced[half..].iter().sum::<f64>() / (differenced.len() - half) as f64;

    assert!(
        (second_half_mean - first_half_mean).abs() < 0.2,
        "differenced series still drifts: {first_half_mean} vs {second_half_mean}"
    );

    // While the raw series plainly does grow.
    let raw = series.values();
    let raw_first: f64 = raw[..60].iter().sum::<f64>() / 60.0;
    let raw_second: f64 = raw[60..].iter().sum::<f64>() / 60.0;
    assert!(raw_second - raw_first > 30.0);
}

// =============================================================================
// Scenario: differencing a stationary series is idempotent
// =============================================================================

#[test]
fn stationary_series_keeps_its_verdict_under_the_chosen_order() {
    let series = daily_series(white_noise(120));
    let config = DifferencingConfig::default().non_seasonal();

    let decision = select_differencing(&series, &config).unwrap();
    assert_eq!(decision.d, 0);

    let before = kpss_test(series.values(), None).unwrap();
    let after = kpss_test(&difference(series.values(), decision.d), None).unwrap();

    assert!(!before.rejects_null(config.alpha));
    assert!(!after.rejects_null(config.alpha));
}

// =============================================================================
// Full pipeline on case-count-like data
// =============================================================================

fn synthetic_case_counts(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            if i % 7 == 0 {
                0.0
            } else {
                30.0 + 0.9 * i as f64 + ((i * 13 + 5) % 17) as f64
            }
        })
        .collect()
}

#[test]
fn full_pipeline_on_growing_counts() {
    let series = daily_series(synthetic_case_counts(140));

    let report = condition(&series, &ConditioningConfig::default()).unwrap();

    // Sunday gaps: weekday diagnostic catches them, transform avoids the log.
    assert_eq!(report.weekday.min_day(), Weekday::Sun);
    assert!(report.weekday.relative_dip() < 0.2);
    assert_eq!(report.transform.lambda(), 0.5);

    // Smoothing marks exactly the boundary points undefined.
    let nan_count = report
        .smoothed
        .values()
        .iter()
        .filter(|v| v.is_nan())
        .count();
    assert_eq!(nan_count, 6);

    // The differencing decision stays within its configured cap and carries
    // its evidence.
    assert!(report.differencing.d <= 2);
    assert!(report.differencing.confirmatory_kpss.p_value > 0.0);
    assert!(report.differencing.adf_differenced.p_value <= 1.0);
}

#[test]
fn pipeline_with_onset_trimming() {
    // Two quiet weeks before the outbreak takes off.
    let mut values = vec![0.0, 0.0, 1.0, 0.0, 2.0, 1.0, 0.0, 1.0, 0.0, 0.0, 3.0, 1.0, 0.0, 2.0];
    values.extend(synthetic_case_counts(126).into_iter().map(|v| v + 10.0));
    let series = daily_series(values);

    let config = ConditioningConfig::default().with_onset_threshold(10.0);
    let report = condition(&series, &config).unwrap();

    assert_eq!(report.cutoff, Some(sunday_start() + Duration::days(14)));
    assert_eq!(report.truncated.len(), 126);
    // Truncation is a pure range filter: the kept values are untouched.
    assert_eq!(report.truncated.values()[0], 10.0);
}

#[test]
fn pipeline_propagates_stage_errors() {
    // Too short for anything to survive the smoother.
    let series = daily_series(vec![5.0, 6.0, 7.0]);
    assert!(condition(&series, &ConditioningConfig::default()).is_err());
}
