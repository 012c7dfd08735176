//! Target selection with ordered strategy fallback.
//!
//! Strategies are tried in order: the weighted evaluator, any alternates
//! the caller registers, then a closed-form heuristic that cannot fail on a
//! non-empty roster. Failures are logged and never reach the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};
use vigil_core::error::ThreatError;
use vigil_core::target::TargetSnapshot;

use crate::evaluator::WeightedEvaluator;
use crate::profiles::get_profile;

#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error(transparent)]
    Threat(#[from] ThreatError),

    #[error("estimator {strategy} failed: {reason}")]
    Failed { strategy: String, reason: String },
}

impl EstimatorError {
    /// Missing input data and strategy-internal failures are recoverable;
    /// configuration defects will fail the same way on every roster.
    pub fn is_recoverable(&self) -> bool {
        match self {
            EstimatorError::Threat(e) => e.is_recoverable(),
            EstimatorError::Failed { .. } => true,
        }
    }
}

/// A way of picking the most threatening target.
pub trait ThreatEstimator: Send + Sync {
    fn name(&self) -> &str;

    /// Id of the chosen target, or `None` if the estimator has no opinion.
    fn estimate(&self, targets: &[TargetSnapshot]) -> Result<Option<u32>, EstimatorError>;
}

/// Outcome of [`Orchestrator::select_target`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Selection {
    Target { id: u32, strategy: String },
    NoTargets,
}

/// The IFWA evaluator as an estimator.
pub struct WeightedEstimator {
    evaluator: WeightedEvaluator,
}

impl WeightedEstimator {
    pub fn new(evaluator: WeightedEvaluator) -> Self {
        Self { evaluator }
    }
}

impl ThreatEstimator for WeightedEstimator {
    fn name(&self) -> &str {
        "weighted"
    }

    fn estimate(&self, targets: &[TargetSnapshot]) -> Result<Option<u32>, EstimatorError> {
        Ok(self.evaluator.most_threatening(targets)?.map(|r| r.target_id))
    }
}

/// Distance × off-axis angle × class factor. Tolerates missing attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEstimator;

impl HeuristicEstimator {
    /// Heuristic threat score; higher is more threatening. Never NaN.
    pub fn score(target: &TargetSnapshot) -> f64 {
        let distance_factor = 1.0 / (target.distance() + 1.0);
        let angle_factor = 1.0 / (target.observer.off_axis_deg(&target.position) + 1.0);
        let class_factor = target
            .class
            .map(|c| get_profile(c).heuristic_factor)
            .unwrap_or(vigil_core::constants::HEURISTIC_DEFAULT_FACTOR);
        let s = distance_factor * angle_factor * class_factor;
        if s.is_finite() {
            s
        } else {
            0.0
        }
    }

    /// Highest-scoring target; earliest wins ties. `None` only when empty.
    pub fn pick(&self, targets: &[TargetSnapshot]) -> Option<u32> {
        targets
            .iter()
            .map(|t| (t.id, Self::score(t)))
            .rev()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

impl ThreatEstimator for HeuristicEstimator {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn estimate(&self, targets: &[TargetSnapshot]) -> Result<Option<u32>, EstimatorError> {
        Ok(self.pick(targets))
    }
}

/// Ordered fallback chain ending in [`HeuristicEstimator`].
pub struct Orchestrator {
    strategies: Vec<Box<dyn ThreatEstimator>>,
    heuristic: HeuristicEstimator,
}

impl Orchestrator {
    /// Chain with the weighted evaluator first.
    pub fn new(evaluator: WeightedEvaluator) -> Self {
        Self {
            strategies: vec![Box::new(WeightedEstimator::new(evaluator))],
            heuristic: HeuristicEstimator,
        }
    }

    /// Chain with no primary strategy: only alternates, then the heuristic.
    pub fn heuristic_only() -> Self {
        Self {
            strategies: Vec::new(),
            heuristic: HeuristicEstimator,
        }
    }

    /// Append an alternate, consulted after those already registered.
    pub fn with_alternate(mut self, estimator: Box<dyn ThreatEstimator>) -> Self {
        self.strategies.push(estimator);
        self
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies
            .iter()
            .map(|s| s.name())
            .chain(std::iter::once(self.heuristic.name()))
            .collect()
    }

    pub fn select_target(&self, targets: &[TargetSnapshot]) -> Selection {
        if targets.is_empty() {
            return Selection::NoTargets;
        }

        for strategy in &self.strategies {
            match strategy.estimate(targets) {
                Ok(Some(id)) if targets.iter().any(|t| t.id == id) => {
                    info!(id, strategy = strategy.name(), "selected target");
                    return Selection::Target {
                        id,
                        strategy: strategy.name().to_string(),
                    };
                }
                Ok(Some(id)) => {
                    warn!(id, strategy = strategy.name(), "estimator chose an unknown target, falling back");
                }
                Ok(None) => {
                    warn!(strategy = strategy.name(), "estimator returned no target, falling back");
                }
                Err(e) if e.is_recoverable() => {
                    warn!(strategy = strategy.name(), error = %e, "estimator failed, falling back");
                }
                Err(e) => {
                    error!(strategy = strategy.name(), error = %e, "estimator is misconfigured, falling back");
                }
            }
        }

        match self.heuristic.pick(targets) {
            Some(id) => {
                info!(id, strategy = self.heuristic.name(), "selected target");
                Selection::Target {
                    id,
                    strategy: self.heuristic.name().to_string(),
                }
            }
            None => Selection::NoTargets,
        }
    }
}
