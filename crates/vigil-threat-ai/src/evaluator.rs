//! Weighted multi-indicator threat evaluation.
//!
//! Six indicator values are fused with IFWA under the configured weight
//! vector into one comprehensive fuzzy value per target, then ranked by
//! score and accuracy.

use std::cmp::Ordering;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vigil_core::config::EvaluatorConfig;
use vigil_core::enums::{Indicator, ThreatLevel};
use vigil_core::error::ThreatError;
use vigil_core::target::TargetSnapshot;
use vigil_ifs::{weighted_average, FuzzyValue};
use vigil_terrain::{complexity_at, line_of_sight, TerrainModel};

use crate::indicators::{IndicatorResult, Quantifiers};

/// One indicator's part in a comprehensive score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub indicator: Indicator,
    pub weight: f64,
    pub indicator_score: f64,
    /// `weight * indicator_score`.
    pub weighted_score: f64,
    /// `weighted_score` over the comprehensive score; 0 when that is 0.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub target_id: u32,
    pub value: FuzzyValue,
    pub score: f64,
    pub accuracy: f64,
    pub level: ThreatLevel,
    /// In [`Indicator::ALL`] order.
    pub indicators: [IndicatorResult; 6],
    /// In [`Indicator::ALL`] order.
    pub contributions: [Contribution; 6],
    /// Distance to the observer (m).
    pub distance: f64,
}

impl EvaluationResult {
    pub fn indicator(&self, indicator: Indicator) -> &IndicatorResult {
        &self.indicators[indicator.index()]
    }
}

/// Outcome of a head-to-head comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetComparison {
    /// `None` when the two are indistinguishable.
    pub more_threatening: Option<u32>,
    /// First score minus second score.
    pub score_difference: f64,
    pub first: EvaluationResult,
    pub second: EvaluationResult,
}

/// IFWA threat evaluator. Immutable after construction; safe to share.
#[derive(Debug, Clone)]
pub struct WeightedEvaluator {
    config: EvaluatorConfig,
    weights: [f64; 6],
    quantifiers: Quantifiers,
    terrain: Option<Arc<TerrainModel>>,
}

impl WeightedEvaluator {
    pub fn new(config: EvaluatorConfig, terrain: Option<Arc<TerrainModel>>) -> Result<Self, ThreatError> {
        config.validate()?;
        let quantifiers = Quantifiers::new(&config)?;
        Ok(Self {
            weights: config.weights.as_array(),
            config,
            quantifiers,
            terrain,
        })
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn terrain(&self) -> Option<&Arc<TerrainModel>> {
        self.terrain.as_ref()
    }

    /// Evaluate one target.
    pub fn evaluate(&self, target: &TargetSnapshot) -> Result<EvaluationResult, ThreatError> {
        let missing = |attribute| ThreatError::MissingAttribute {
            target_id: target.id,
            attribute,
        };
        if !target.position.is_finite() {
            return Err(missing("position"));
        }
        if !target.observer.position.is_finite() {
            return Err(missing("observer"));
        }
        let class = target.class.ok_or_else(|| missing("class"))?;
        let speed = target
            .speed
            .filter(|s| s.is_finite() && *s >= 0.0)
            .ok_or_else(|| missing("speed"))?;
        let heading = target
            .heading_deg
            .filter(|h| h.is_finite())
            .ok_or_else(|| missing("heading"))?;

        let observer = target.observer.position;
        let distance = target.distance();

        let (sightline, complexity) = match self.terrain.as_deref() {
            Some(model) => (
                Some(line_of_sight(model, &observer, &target.position)),
                Some(complexity_at(model, &target.position, self.config.complexity_radius)),
            ),
            None => (None, None),
        };

        let q = &self.quantifiers;
        let indicators = [
            q.distance(distance),
            q.unit_type(class),
            q.speed(speed, class),
            q.angle(&target.position, heading, &observer),
            q.visibility(sightline.as_ref()),
            q.environment(complexity.as_ref()),
        ];

        let values = indicators.each_ref().map(|r| r.value);
        let value = weighted_average(&values, &self.weights)?;
        let score = value.score();
        let level = self.config.comprehensive_levels.level(score);

        let contributions = std::array::from_fn(|i| {
            let (r, weight) = (&indicators[i], self.weights[i]);
            let weighted_score = weight * r.threat_score;
            Contribution {
                indicator: r.indicator,
                weight,
                indicator_score: r.threat_score,
                weighted_score,
                share: if score == 0.0 { 0.0 } else { weighted_score / score },
            }
        });

        debug!(
            target_id = target.id,
            score,
            accuracy = value.accuracy(),
            level = %level,
            "evaluated target"
        );

        Ok(EvaluationResult {
            target_id: target.id,
            value,
            score,
            accuracy: value.accuracy(),
            level,
            indicators,
            contributions,
            distance,
        })
    }

    /// Evaluate all targets and sort most threatening first.
    ///
    /// Evaluation runs in parallel; the first failure in input order is
    /// returned. Ties on score and accuracy keep input order.
    pub fn rank(&self, targets: &[TargetSnapshot]) -> Result<Vec<EvaluationResult>, ThreatError> {
        let evaluated: Vec<Result<EvaluationResult, ThreatError>> =
            targets.par_iter().map(|t| self.evaluate(t)).collect();
        let mut results = evaluated.into_iter().collect::<Result<Vec<_>, _>>()?;
        // sort_by is stable, so equal keys stay in input order.
        results.sort_by(rank_order);
        Ok(results)
    }

    /// Highest-ranked target; `None` only for an empty roster.
    pub fn most_threatening(&self, targets: &[TargetSnapshot]) -> Result<Option<EvaluationResult>, ThreatError> {
        Ok(self.rank(targets)?.into_iter().next())
    }

    /// Evaluate two targets and compare them with the IFS ranking rule.
    pub fn compare_targets(
        &self,
        first: &TargetSnapshot,
        second: &TargetSnapshot,
    ) -> Result<TargetComparison, ThreatError> {
        let first = self.evaluate(first)?;
        let second = self.evaluate(second)?;
        let more_threatening = match first.value.compare(&second.value) {
            Ordering::Greater => Some(first.target_id),
            Ordering::Less => Some(second.target_id),
            Ordering::Equal => None,
        };
        Ok(TargetComparison {
            more_threatening,
            score_difference: first.score - second.score,
            first,
            second,
        })
    }
}

/// Score descending, then accuracy descending.
fn rank_order(a: &EvaluationResult, b: &EvaluationResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.accuracy.total_cmp(&a.accuracy))
}
