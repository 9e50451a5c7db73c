//! The one-shot conditioning pipeline.
//!
//! Runs the stages in their fixed order (truncate, weekday diagnostic,
//! centered smoothing, power transform, differencing selection), each one a
//! pure function of the previous stage's output. The report keeps every
//! intermediate series and test result so the run can be audited without
//! re-plotting anything. Any stage error aborts the run.

use crate::core::TimeSeries;
use crate::error::Result;
use crate::prep::differencing::{select_differencing, DifferencingConfig, DifferencingDecision};
use crate::prep::power::PowerTransform;
use crate::prep::smooth::centered_moving_average;
use crate::prep::truncate::{onset_cutoff, truncate_before};
use crate::prep::weekday::{weekday_effect, WeekdayEffect};
use chrono::{DateTime, Utc};

/// Configuration for a conditioning run.
#[derive(Debug, Clone)]
pub struct ConditioningConfig {
    /// Trim leading observations until a value reaches this level; `None`
    /// keeps the whole series.
    pub onset_threshold: Option<f64>,
    /// Half-width of the centered moving average.
    pub half_window: usize,
    /// Seasonal period for the differencing decision; below 2 disables the
    /// seasonal step.
    pub seasonal_period: usize,
    /// Significance level for every stationarity test.
    pub alpha: f64,
    /// Maximum non-seasonal differencing order.
    pub max_d: usize,
}

impl Default for ConditioningConfig {
    fn default() -> Self {
        Self {
            onset_threshold: None,
            half_window: 3,
            seasonal_period: 7,
            alpha: 0.05,
            max_d: 2,
        }
    }
}

impl ConditioningConfig {
    /// Trim leading observations below `threshold`.
    pub fn with_onset_threshold(mut self, threshold: f64) -> Self {
        self.onset_threshold = Some(threshold);
        self
    }

    /// Set the smoothing half-window.
    pub fn with_half_window(mut self, half_window: usize) -> Self {
        self.half_window = half_window;
        self
    }

    /// Set the seasonal period.
    pub fn with_seasonal_period(mut self, period: usize) -> Self {
        self.seasonal_period = period;
        self
    }
}

/// Everything a conditioning run produced, stage by stage.
#[derive(Debug, Clone)]
pub struct ConditioningReport {
    /// The onset cutoff applied, when one was found.
    pub cutoff: Option<DateTime<Utc>>,
    /// Series after truncation.
    pub truncated: TimeSeries,
    /// Day-of-week collection-bias diagnostic on the truncated series.
    pub weekday: WeekdayEffect,
    /// Centered moving average of the truncated series; boundary points are
    /// undefined.
    pub smoothed: TimeSeries,
    /// The variance-stabilizing transform that was selected.
    pub transform: PowerTransform,
    /// Transformed interior of the smoothed series (undefined boundaries
    /// dropped, then transformed).
    pub transformed: TimeSeries,
    /// Differencing-order decision on the transformed series.
    pub differencing: DifferencingDecision,
}

/// Condition a raw series for model fitting.
///
/// The transform exponent is selected from the truncated series: collection
/// gaps show up there as literal zeros, which is exactly the condition that
/// rules out the log transform.
pub fn condition(series: &TimeSeries, config: &ConditioningConfig) -> Result<ConditioningReport> {
    let cutoff = config
        .onset_threshold
        .and_then(|threshold| onset_cutoff(series, threshold));
    let truncated = match cutoff {
        Some(at) => truncate_before(series, at),
        None => series.clone(),
    };

    let weekday = weekday_effect(&truncated)?;

    let smoothed = centered_moving_average(&truncated, config.half_window)?;
    let interior = smoothed.defined();

    let transform = PowerTransform::select(&truncated);
    let transformed = transform.apply(&interior);

    let differencing = select_differencing(
        &transformed,
        &DifferencingConfig {
            seasonal_period: config.seasonal_period,
            max_d: config.max_d,
            alpha: config.alpha,
        },
    )?;

    Ok(ConditioningReport {
        cutoff,
        truncated,
        weekday,
        smoothed,
        transform,
        transformed,
        differencing,
    })
}
