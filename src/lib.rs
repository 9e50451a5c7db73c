//! # forecast-lab
//!
//! Conditioning pipeline and candidate-model evaluation for noisy count
//! time series.
//!
//! Case-count data arrives with collection artifacts: leading near-zero
//! stretches, day-of-week reporting gaps, and level-dependent variance. This
//! crate turns a raw series into something a SARIMA or ETS engine can fit:
//! truncation, a weekday-bias diagnostic, centered moving-average smoothing,
//! a variance-stabilizing power transform, and a test-driven differencing
//! decision. Candidate specifications are then ranked by AICc with residual
//! diagnostics attached.
//!
//! Model fitting itself is a capability supplied from outside through the
//! [`models::ModelEngine`] trait; everything here is the reproducible logic
//! around it.
//!
//! ```
//! use forecast_lab::pipeline::{condition, ConditioningConfig};
//! use forecast_lab::prelude::*;
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let base = Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap();
//! let timestamps: Vec<_> = (0..120).map(|i| base + Duration::days(i)).collect();
//! let values: Vec<f64> = (0..120)
//!     .map(|i| if i % 7 == 0 { 0.0 } else { 40.0 + 0.5 * i as f64 })
//!     .collect();
//! let series = TimeSeries::new(timestamps, values).unwrap();
//!
//! let report = condition(&series, &ConditioningConfig::default()).unwrap();
//! println!(
//!     "weakest reporting day {:?}, d = {}",
//!     report.weekday.min_day(),
//!     report.differencing.d
//! );
//! ```

pub mod core;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod prep;
pub mod utils;
pub mod validation;

pub use error::{AnalysisError, Result};

pub mod prelude {
    pub use crate::core::{Forecast, TimeSeries};
    pub use crate::error::{AnalysisError, Result};
    pub use crate::models::{Candidate, CandidateSpec, FittedModel, ModelEngine};
    pub use crate::pipeline::{condition, ConditioningConfig, ConditioningReport};
}
