//! Summary statistics over a batch of evaluations.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use vigil_core::enums::{Indicator, ThreatLevel};

use crate::evaluator::EvaluationResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDistribution {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Mean and max absolute weighted contribution of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorImportance {
    pub indicator: Indicator,
    pub weight: f64,
    pub mean_contribution: f64,
    pub max_contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatStatistics {
    pub total: usize,
    pub levels: LevelDistribution,
    pub scores: ScoreSummary,
    pub importance: Vec<IndicatorImportance>,
    pub most_threatening: u32,
    pub least_threatening: u32,
}

/// Summarize `results`. `None` for an empty batch. Order does not matter.
pub fn statistics(results: &[EvaluationResult]) -> Option<ThreatStatistics> {
    let first = results.first()?;
    let n = results.len() as f64;

    let mut levels = LevelDistribution::default();
    for r in results {
        match r.level {
            ThreatLevel::Critical => levels.critical += 1,
            ThreatLevel::High => levels.high += 1,
            ThreatLevel::Medium => levels.medium += 1,
            ThreatLevel::Low => levels.low += 1,
        }
    }

    let mut scores: Vec<f64> = results.iter().map(|r| r.score).collect();
    scores.sort_by(f64::total_cmp);
    let mean = scores.iter().sum::<f64>() / n;
    let mid = scores.len() / 2;
    let median = if scores.len() % 2 == 0 {
        (scores[mid - 1] + scores[mid]) / 2.0
    } else {
        scores[mid]
    };
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

    let importance = Indicator::ALL
        .iter()
        .map(|&indicator| {
            let contribs = results
                .iter()
                .map(|r| r.contributions[indicator.index()].weighted_score.abs());
            let (sum, max) = contribs.fold((0.0, 0.0_f64), |(s, m), c| (s + c, m.max(c)));
            IndicatorImportance {
                indicator,
                weight: first.contributions[indicator.index()].weight,
                mean_contribution: sum / n,
                max_contribution: max,
            }
        })
        .collect();

    let by_threat = |a: &&EvaluationResult, b: &&EvaluationResult| -> Ordering { a.value.compare(&b.value) };
    let most = results.iter().rev().max_by(by_threat).unwrap_or(first);
    let least = results.iter().min_by(by_threat).unwrap_or(first);

    Some(ThreatStatistics {
        total: results.len(),
        levels,
        scores: ScoreSummary {
            mean,
            median,
            std_dev: variance.sqrt(),
            min: scores[0],
            max: scores[scores.len() - 1],
        },
        importance,
        most_threatening: most.target_id,
        least_threatening: least.target_id,
    })
}
