//! Statistical tests backing the conditioning and evaluation decisions.
//!
//! # Example
//!
//! ```
//! use forecast_lab::validation::{adf_test, kpss_test, ljung_box};
//!
//! let series: Vec<f64> = (0..60).map(|i| ((i * 17 + 13) % 97) as f64 / 50.0).collect();
//!
//! let adf = adf_test(&series, None).unwrap();
//! let kpss = kpss_test(&series, None).unwrap();
//! // ADF rejecting its unit-root null and KPSS failing to reject its
//! // stationarity null together support treating the series as stationary.
//! let _ = (adf.rejects_null(0.05), kpss.rejects_null(0.05));
//!
//! let residuals = vec![0.1, -0.2, 0.15, -0.1, 0.05, -0.08, 0.12, -0.15, 0.1, -0.05];
//! let lb = ljung_box(&residuals, Some(5), 0).unwrap();
//! if !lb.is_white_noise(0.05) {
//!     println!("residual autocorrelation remains (Q = {:.2})", lb.statistic);
//! }
//! ```

pub mod residual;
pub mod stationarity;

pub use residual::{ljung_box, residual_acf, PortmanteauTest};
pub use stationarity::{adf_test, kpss_test, CriticalValues, Tail, UnitRootTest};
