//! Candidate evaluation and forecast accuracy.
//!
//! Every candidate is fitted in isolation so one engine failure cannot sink
//! the comparison; the survivors are ranked by AICc with their residual
//! diagnostics attached. Selection stays auditable: the comparison reports
//! metrics, the caller applies judgment (e.g. preferring the simpler of two
//! near-tied candidates).

use crate::core::TimeSeries;
use crate::error::{AnalysisError, Result};
use crate::models::candidate::Candidate;
use crate::models::engine::{FittedModel, ModelEngine};
use crate::utils::metrics::{accuracy, AccuracyMetrics};
use crate::validation::residual::{ljung_box, PortmanteauTest};

/// Configuration for candidate evaluation.
#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    /// Significance level for residual diagnostics.
    pub alpha: f64,
    /// Lag count for the Ljung-Box test; `None` uses the test's default.
    pub ljung_box_lags: Option<usize>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            ljung_box_lags: None,
        }
    }
}

/// A successfully fitted and diagnosed candidate.
pub struct EvaluatedCandidate {
    pub candidate: Candidate,
    /// Corrected Akaike information criterion from the engine.
    pub aicc: f64,
    /// Portmanteau test on the fit's residuals.
    pub ljung_box: PortmanteauTest,
    /// The fitted model handle, for forecasting.
    pub model: Box<dyn FittedModel>,
}

impl EvaluatedCandidate {
    /// True when no significant residual autocorrelation remains.
    pub fn residuals_adequate(&self, alpha: f64) -> bool {
        self.ljung_box.is_white_noise(alpha)
    }
}

impl std::fmt::Debug for EvaluatedCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluatedCandidate")
            .field("candidate", &self.candidate.name)
            .field("aicc", &self.aicc)
            .field("ljung_box_p", &self.ljung_box.p_value)
            .finish()
    }
}

/// A candidate whose fit failed, with the reason.
#[derive(Debug, Clone)]
pub struct CandidateFailure {
    pub candidate: Candidate,
    pub reason: AnalysisError,
}

/// Outcome of evaluating a set of candidates.
pub struct ModelComparison {
    evaluated: Vec<EvaluatedCandidate>,
    failures: Vec<CandidateFailure>,
}

impl ModelComparison {
    /// Successful candidates, ranked by ascending AICc.
    pub fn ranked(&self) -> &[EvaluatedCandidate] {
        &self.evaluated
    }

    /// Candidates whose fit failed, with per-candidate reasons.
    pub fn failures(&self) -> &[CandidateFailure] {
        &self.failures
    }

    /// The minimum-AICc candidate.
    pub fn best(&self) -> Option<&EvaluatedCandidate> {
        self.evaluated.first()
    }

    /// The minimum-AICc candidate whose residuals pass the portmanteau test
    /// at `alpha`.
    pub fn best_adequate(&self, alpha: f64) -> Option<&EvaluatedCandidate> {
        self.evaluated
            .iter()
            .find(|c| c.residuals_adequate(alpha))
    }
}

/// Fit and diagnose each candidate, isolating per-candidate failures.
pub fn evaluate_candidates(
    engine: &dyn ModelEngine,
    series: &TimeSeries,
    candidates: &[Candidate],
    config: &EvaluationConfig,
) -> Result<ModelComparison> {
    if candidates.is_empty() {
        return Err(AnalysisError::EmptyData);
    }

    let mut evaluated = Vec::new();
    let mut failures = Vec::new();

    for candidate in candidates {
        match evaluate_one(engine, series, candidate, config) {
            Ok(entry) => evaluated.push(entry),
            Err(reason) => failures.push(CandidateFailure {
                candidate: candidate.clone(),
                reason,
            }),
        }
    }

    // Ascending AICc; NaN criteria sink to the end.
    evaluated.sort_by(|a, b| {
        a.aicc
            .partial_cmp(&b.aicc)
            .unwrap_or(std::cmp::Ordering::Greater)
    });

    Ok(ModelComparison {
        evaluated,
        failures,
    })
}

fn evaluate_one(
    engine: &dyn ModelEngine,
    series: &TimeSeries,
    candidate: &Candidate,
    config: &EvaluationConfig,
) -> Result<EvaluatedCandidate> {
    let model = engine.fit(series, candidate)?;
    let diagnostics = ljung_box(
        model.residuals(),
        config.ljung_box_lags,
        candidate.spec.num_params(),
    )?;

    Ok(EvaluatedCandidate {
        candidate: candidate.clone(),
        aicc: model.aicc(),
        ljung_box: diagnostics,
        model,
    })
}

/// Forecast accuracy against held-out observations.
#[derive(Debug, Clone)]
pub struct HoldoutEvaluation {
    /// The point forecasts that were scored.
    pub forecast: crate::core::Forecast,
    /// Root-mean-squared error against the held-out actuals.
    pub rmse: f64,
    /// Full accuracy metrics.
    pub metrics: AccuracyMetrics,
}

/// Score a fitted model against held-out actuals.
///
/// Forecasts `actual.len()` steps and compares; read-only, no retraining.
pub fn holdout_accuracy(
    model: &dyn FittedModel,
    actual: &[f64],
) -> Result<HoldoutEvaluation> {
    if actual.is_empty() {
        return Err(AnalysisError::EmptyData);
    }

    let forecast = model.forecast(actual.len())?;
    let metrics = accuracy(actual, forecast.point())?;

    Ok(HoldoutEvaluation {
        rmse: metrics.rmse,
        forecast,
        metrics,
    })
}
