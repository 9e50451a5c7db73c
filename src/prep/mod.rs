//! Conditioning stages applied to a raw series before model fitting.
//!
//! Each stage is a pure function: it consumes the previous stage's output and
//! returns a new series or decision, never mutating shared state.

pub mod differencing;
pub mod power;
pub mod smooth;
pub mod truncate;
pub mod weekday;

pub use differencing::{
    difference, seasonal_difference, select_differencing, DifferencingConfig,
    DifferencingDecision, TestAgreement,
};
pub use power::PowerTransform;
pub use smooth::centered_moving_average;
pub use truncate::{onset_cutoff, truncate_before};
pub use weekday::{weekday_effect, WeekdayDummies, WeekdayEffect};
