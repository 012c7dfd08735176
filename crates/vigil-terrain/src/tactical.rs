//! Tactical position assessment built from sightline and complexity.

use serde::{Deserialize, Serialize};
use vigil_core::types::Position;

use crate::complexity::{complexity_at, Complexity, ComplexityLevel};
use crate::los::{line_of_sight, Sightline};
use crate::scene::TerrainModel;

/// Which side the terrain favours at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TacticalAdvantage {
    /// Hidden in complex terrain.
    Enemy,
    /// Exposed in the open.
    Observer,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalAssessment {
    pub position: Position,
    pub distance: f64,
    pub sightline: Sightline,
    pub complexity: Complexity,
    pub advantage: TacticalAdvantage,
    pub description: String,
}

/// Assess `position` as seen from `observer`.
pub fn assess_position(
    model: &TerrainModel,
    position: &Position,
    observer: &Position,
    radius: f64,
) -> TacticalAssessment {
    let sightline = line_of_sight(model, observer, position);
    let complexity = complexity_at(model, position, radius);

    let advantage = match (sightline.blocked, complexity.level) {
        (true, ComplexityLevel::Complex) => TacticalAdvantage::Enemy,
        (false, ComplexityLevel::Open) => TacticalAdvantage::Observer,
        _ => TacticalAdvantage::Neutral,
    };
    let description = describe(&sightline, &complexity);

    TacticalAssessment {
        position: *position,
        distance: observer.range_to(position),
        sightline,
        complexity,
        advantage,
        description,
    }
}

fn describe(sightline: &Sightline, complexity: &Complexity) -> String {
    let mut parts = Vec::with_capacity(5);
    if sightline.blocked {
        parts.push(format!(
            "line of sight blocked ({} buildings, {} obstacles)",
            sightline.blocking_buildings.len(),
            sightline.blocking_obstacles.len()
        ));
    } else {
        parts.push("clear line of sight".to_string());
    }
    parts.push(format!("{} terrain", complexity.level.name()));
    if complexity.nearby_buildings > 0 {
        parts.push(format!("{} buildings nearby", complexity.nearby_buildings));
    }
    if complexity.nearby_obstacles > 0 {
        parts.push(format!("{} obstacles nearby", complexity.nearby_obstacles));
    }
    if complexity.in_corridor {
        parts.push("inside an alley".to_string());
    }
    parts.join(", ")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySummary {
    pub total: usize,
    pub blocked: usize,
    pub visible: usize,
    pub in_complex_terrain: usize,
    /// Mean visible fraction; 1.0 for an empty survey.
    pub mean_visible_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub assessments: Vec<(u32, TacticalAssessment)>,
    pub summary: SurveySummary,
}

/// Assess a batch of `(id, position)` pairs against one observer.
pub fn survey(model: &TerrainModel, targets: &[(u32, Position)], observer: &Position, radius: f64) -> Survey {
    let assessments: Vec<_> = targets
        .iter()
        .map(|(id, pos)| (*id, assess_position(model, pos, observer, radius)))
        .collect();

    let total = assessments.len();
    let blocked = assessments.iter().filter(|(_, a)| a.sightline.blocked).count();
    let in_complex_terrain = assessments
        .iter()
        .filter(|(_, a)| a.complexity.level == ComplexityLevel::Complex)
        .count();
    let mean_visible_fraction = if total == 0 {
        1.0
    } else {
        assessments.iter().map(|(_, a)| a.sightline.visible_fraction).sum::<f64>() / total as f64
    };

    Survey {
        assessments,
        summary: SurveySummary {
            total,
            blocked,
            visible: total - blocked,
            in_complex_terrain,
            mean_visible_fraction,
        },
    }
}
