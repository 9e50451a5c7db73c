//! The model-fitting capability seam.
//!
//! Fitting SARIMA or ETS models is supplied by an external collaborator. The
//! traits here define exactly what the evaluation step needs back from it:
//! parameter estimates, a corrected information criterion, residuals, and
//! forecasts. Both traits are object-safe so engines and fits can be boxed.

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;
use crate::models::candidate::Candidate;

/// A model fitted to a series by some engine.
pub trait FittedModel {
    /// Name of the candidate this fit came from.
    fn candidate_name(&self) -> &str;

    /// Estimated parameters as (name, value) pairs.
    fn parameters(&self) -> Vec<(String, f64)>;

    /// Corrected Akaike information criterion; lower is better.
    fn aicc(&self) -> f64;

    /// In-sample residuals (actual minus fitted).
    fn residuals(&self) -> &[f64];

    /// Point forecasts (with interval bounds when the engine supports them)
    /// for `horizon` future steps. Read-only; never refits.
    fn forecast(&self, horizon: usize) -> Result<Forecast>;
}

/// A capability that fits candidate specifications to a series.
pub trait ModelEngine {
    /// Fit one candidate. A failure here concerns this candidate only;
    /// callers evaluate the remaining candidates regardless.
    fn fit(&self, series: &TimeSeries, candidate: &Candidate) -> Result<Box<dyn FittedModel>>;
}
