//! Local environment complexity around a position.
//!
//! Densities are measured by sampling a regular grid over the disc of the
//! given radius and counting samples covered by footprints, so overlapping
//! footprints are never double counted and rotated footprints are exact.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use vigil_core::constants::{COMPLEXITY_SAMPLE_STEP, MODERATE_DENSITY, OPEN_DENSITY};
use vigil_core::types::Position;

use crate::scene::TerrainModel;

/// Coarse terrain class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Open,
    Moderate,
    Complex,
}

impl ComplexityLevel {
    pub fn name(self) -> &'static str {
        match self {
            ComplexityLevel::Open => "open",
            ComplexityLevel::Moderate => "moderate",
            ComplexityLevel::Complex => "complex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complexity {
    /// Share of the disc covered by buildings, [0, 1].
    pub building_density: f64,
    /// Share of the disc covered by obstacles, [0, 1].
    pub obstacle_density: f64,
    /// Share of the disc covered by any solid footprint, [0, 1].
    pub combined_density: f64,
    pub nearby_buildings: usize,
    pub nearby_obstacles: usize,
    pub in_corridor: bool,
    pub level: ComplexityLevel,
}

impl Complexity {
    /// Nothing around: zero densities, open ground.
    pub fn open() -> Self {
        Self {
            building_density: 0.0,
            obstacle_density: 0.0,
            combined_density: 0.0,
            nearby_buildings: 0,
            nearby_obstacles: 0,
            in_corridor: false,
            level: ComplexityLevel::Open,
        }
    }
}

/// Measure the surroundings of `center` within `radius` meters.
pub fn complexity_at(model: &TerrainModel, center: &Position, radius: f64) -> Complexity {
    let c = center.to_dvec2();
    let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };

    let nearby_buildings = model
        .buildings()
        .iter()
        .filter(|b| b.footprint.within(c, radius))
        .count();
    let nearby_obstacles = model
        .obstacles()
        .iter()
        .filter(|o| o.footprint.within(c, radius))
        .count();
    let in_corridor = model.corridors().iter().any(|k| k.contains(c));

    let mut samples = 0usize;
    let mut on_building = 0usize;
    let mut on_obstacle = 0usize;
    let mut on_any = 0usize;

    let step = COMPLEXITY_SAMPLE_STEP;
    let n = (radius / step).floor() as i64;
    for i in -n..=n {
        for j in -n..=n {
            let offset = DVec2::new(i as f64 * step, j as f64 * step);
            if offset.length_squared() > radius * radius {
                continue;
            }
            let p = c + offset;
            samples += 1;

            let b = model.buildings().iter().any(|b| b.footprint.contains(p));
            let o = model.obstacles().iter().any(|o| o.footprint.contains(p));
            on_building += b as usize;
            on_obstacle += o as usize;
            on_any += (b || o) as usize;
        }
    }

    // The center sample (i = j = 0) is always taken.
    let share = |count: usize| count as f64 / samples as f64;
    let combined_density = share(on_any);

    let level = if combined_density < OPEN_DENSITY && nearby_buildings == 0 {
        ComplexityLevel::Open
    } else if combined_density < MODERATE_DENSITY {
        ComplexityLevel::Moderate
    } else {
        ComplexityLevel::Complex
    };

    Complexity {
        building_density: share(on_building),
        obstacle_density: share(on_obstacle),
        combined_density,
        nearby_buildings,
        nearby_obstacles,
        in_corridor,
        level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Building, Corridor, Footprint, Obstacle, ObstacleKind};

    #[test]
    fn test_empty_scene_is_open() {
        let c = complexity_at(&TerrainModel::empty(), &Position::new(3.0, 4.0), 10.0);
        assert_eq!(c, Complexity::open());
    }

    #[test]
    fn test_fully_covered_is_complex() {
        let model = TerrainModel::new(
            vec![Building { id: 1, footprint: Footprint::new(DVec2::ZERO, 40.0, 40.0), height: 20.0 }],
            vec![],
            vec![],
            None,
        );
        let c = complexity_at(&model, &Position::new(0.0, 0.0), 10.0);
        assert_eq!(c.building_density, 1.0);
        assert_eq!(c.combined_density, 1.0);
        assert_eq!(c.nearby_buildings, 1);
        assert_eq!(c.level, ComplexityLevel::Complex);
    }

    #[test]
    fn test_overlap_not_double_counted() {
        let fp = Footprint::new(DVec2::ZERO, 40.0, 40.0);
        let model = TerrainModel::new(
            vec![Building { id: 1, footprint: fp, height: 5.0 }],
            vec![Obstacle { id: 2, kind: ObstacleKind::Debris, footprint: fp }],
            vec![],
            None,
        );
        let c = complexity_at(&model, &Position::new(0.0, 0.0), 10.0);
        assert_eq!(c.obstacle_density, 1.0);
        assert_eq!(c.combined_density, 1.0);
    }

    #[test]
    fn test_nearby_building_prevents_open() {
        // Small building at the disc edge: low density but present.
        let model = TerrainModel::new(
            vec![Building { id: 1, footprint: Footprint::new(DVec2::new(9.5, 0.0), 1.0, 1.0), height: 3.0 }],
            vec![],
            vec![],
            None,
        );
        let c = complexity_at(&model, &Position::new(0.0, 0.0), 10.0);
        assert!(c.combined_density < 0.2);
        assert_eq!(c.nearby_buildings, 1);
        assert_eq!(c.level, ComplexityLevel::Moderate);
    }

    #[test]
    fn test_half_covered_density() {
        // Building covers x >= 0 side of the disc.
        let model = TerrainModel::new(
            vec![Building { id: 1, footprint: Footprint::new(DVec2::new(15.0, 0.0), 30.0, 40.0), height: 5.0 }],
            vec![],
            vec![],
            None,
        );
        let c = complexity_at(&model, &Position::new(0.0, 0.0), 10.0);
        assert!(c.building_density > 0.45 && c.building_density < 0.6, "{}", c.building_density);
        assert_eq!(c.level, ComplexityLevel::Complex);
    }

    #[test]
    fn test_corridor_membership() {
        let model = TerrainModel::new(
            vec![],
            vec![],
            vec![Corridor { id: 1, start: DVec2::ZERO, end: DVec2::new(30.0, 0.0), width: 5.0 }],
            None,
        );
        assert!(complexity_at(&model, &Position::new(10.0, 1.0), 10.0).in_corridor);
        assert!(!complexity_at(&model, &Position::new(10.0, 8.0), 10.0).in_corridor);
    }
}
