//! Threat evaluation for VIGIL.
//!
//! Implements the six indicator quantifiers, the IFWA weighted evaluator
//! with ranking and statistics, and the fallback orchestrator that picks a
//! single target.

pub mod evaluator;
pub mod indicators;
pub mod orchestrator;
pub mod profiles;
pub mod statistics;

pub use vigil_core as core;

pub use evaluator::{Contribution, EvaluationResult, TargetComparison, WeightedEvaluator};
pub use indicators::{IndicatorDetail, IndicatorResult, Quantifiers};
pub use orchestrator::{
    EstimatorError, HeuristicEstimator, Orchestrator, Selection, ThreatEstimator, WeightedEstimator,
};
pub use statistics::{statistics, ThreatStatistics};
