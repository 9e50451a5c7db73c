//! Candidate model specifications and their evaluation.
//!
//! The fitting numerics live behind the [`engine::ModelEngine`] seam; this
//! module owns the specifications handed to an engine and the comparison of
//! what comes back.

mod candidate;
mod engine;
mod evaluation;

pub use candidate::{
    Candidate, CandidateSpec, ErrorComponent, EtsComponents, SarimaOrder, SeasonalComponent,
    TrendComponent,
};
pub use engine::{FittedModel, ModelEngine};
pub use evaluation::{
    evaluate_candidates, holdout_accuracy, CandidateFailure, EvaluatedCandidate,
    EvaluationConfig, HoldoutEvaluation, ModelComparison,
};
