//! Core data structures for series conditioning and evaluation.

mod forecast;
mod time_series;

pub use forecast::Forecast;
pub use time_series::TimeSeries;
