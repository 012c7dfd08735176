//! Line-of-sight occlusion against scene footprints.
//!
//! Each footprint is tested by moving the sight segment into the
//! rectangle's local frame and clipping it with Liang–Barsky. A footprint
//! blocks only if the clipped span has positive length, so grazing a corner
//! or running along an edge leaves the line clear.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use vigil_core::types::Position;

use crate::scene::{Footprint, TerrainModel};

/// Minimum parametric overlap that counts as blocking.
const MIN_BLOCKED_SPAN: f64 = 1e-9;

/// Result of a line-of-sight query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sightline {
    pub blocked: bool,
    /// Fraction of the segment outside every footprint, in [0, 1].
    pub visible_fraction: f64,
    pub blocking_buildings: Vec<u32>,
    pub blocking_obstacles: Vec<u32>,
}

impl Sightline {
    pub fn clear() -> Self {
        Self {
            blocked: false,
            visible_fraction: 1.0,
            blocking_buildings: Vec::new(),
            blocking_obstacles: Vec::new(),
        }
    }

    pub fn blocker_count(&self) -> usize {
        self.blocking_buildings.len() + self.blocking_obstacles.len()
    }
}

/// Test the segment `from → to` against every building and obstacle.
pub fn line_of_sight(model: &TerrainModel, from: &Position, to: &Position) -> Sightline {
    let a = from.to_dvec2();
    let b = to.to_dvec2();
    if a == b {
        return Sightline::clear();
    }

    let mut spans = Vec::new();
    let mut blocking_buildings = Vec::new();
    let mut blocking_obstacles = Vec::new();

    for building in model.buildings() {
        if let Some(span) = clip_segment(&building.footprint, a, b) {
            blocking_buildings.push(building.id);
            spans.push(span);
        }
    }
    for obstacle in model.obstacles() {
        if let Some(span) = clip_segment(&obstacle.footprint, a, b) {
            blocking_obstacles.push(obstacle.id);
            spans.push(span);
        }
    }

    if spans.is_empty() {
        return Sightline::clear();
    }

    Sightline {
        blocked: true,
        visible_fraction: (1.0 - union_length(&mut spans)).clamp(0.0, 1.0),
        blocking_buildings,
        blocking_obstacles,
    }
}

/// Liang–Barsky clip of segment `a → b` against `fp`.
///
/// Returns the parametric interval `[t0, t1] ⊂ [0, 1]` inside the footprint,
/// or `None` if the overlap is empty or degenerate.
pub fn clip_segment(fp: &Footprint, a: DVec2, b: DVec2) -> Option<(f64, f64)> {
    let p0 = fp.to_local(a);
    let d = fp.to_local(b) - p0;
    let h = fp.half_extents;

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    // Edges: left, right, bottom, top.
    let checks = [
        (-d.x, p0.x + h.x),
        (d.x, h.x - p0.x),
        (-d.y, p0.y + h.y),
        (d.y, h.y - p0.y),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            // Parallel to this edge: on or outside it never enters the interior.
            if q <= 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    (t1 - t0 > MIN_BLOCKED_SPAN).then_some((t0, t1))
}

/// Total length of the union of intervals. Sorts in place.
fn union_length(spans: &mut [(f64, f64)]) -> f64 {
    spans.sort_by(|x, y| x.0.total_cmp(&y.0));

    let mut total = 0.0;
    let mut current: Option<(f64, f64)> = None;
    for &(s, e) in spans.iter() {
        current = match current {
            Some((cs, ce)) if s <= ce => Some((cs, ce.max(e))),
            Some((cs, ce)) => {
                total += ce - cs;
                Some((s, e))
            }
            None => Some((s, e)),
        };
    }
    if let Some((cs, ce)) = current {
        total += ce - cs;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Building, Obstacle, ObstacleKind};
    use std::f64::consts::FRAC_PI_4;

    fn building(id: u32, x: f64, y: f64, w: f64, d: f64) -> Building {
        Building { id, footprint: Footprint::new(DVec2::new(x, y), w, d), height: 10.0 }
    }

    fn model_with(buildings: Vec<Building>, obstacles: Vec<Obstacle>) -> TerrainModel {
        TerrainModel::new(buildings, obstacles, Vec::new(), None)
    }

    #[test]
    fn test_los_clear_in_empty_scene() {
        let model = TerrainModel::empty();
        let s = line_of_sight(&model, &Position::new(0.0, 0.0), &Position::new(0.0, 50.0));
        assert_eq!(s, Sightline::clear());
    }

    #[test]
    fn test_los_segment_beside_building_is_clear() {
        let model = model_with(vec![building(1, 10.0, 15.0, 8.0, 12.0)], vec![]);
        let s = line_of_sight(&model, &Position::new(0.0, 0.0), &Position::new(0.0, 40.0));
        assert!(!s.blocked);
        assert_eq!(s.visible_fraction, 1.0);
    }

    #[test]
    fn test_los_blocked_through_interior() {
        // Segment y in [0, 40], building covers y in [15, 25].
        let model = model_with(vec![building(7, 0.0, 20.0, 6.0, 10.0)], vec![]);
        let s = line_of_sight(&model, &Position::new(0.0, 0.0), &Position::new(0.0, 40.0));
        assert!(s.blocked);
        assert_eq!(s.blocking_buildings, vec![7]);
        assert!((s.visible_fraction - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_los_edge_and_corner_contact_is_clear() {
        let model = model_with(vec![building(1, 5.0, 5.0, 10.0, 10.0)], vec![]);
        // Runs along the left edge x = 0.
        let along = line_of_sight(&model, &Position::new(0.0, -5.0), &Position::new(0.0, 20.0));
        assert!(!along.blocked);
        // Touches only the corner (10, 10).
        let corner = line_of_sight(&model, &Position::new(20.0, 0.0), &Position::new(0.0, 20.0));
        assert!(!corner.blocked);
    }

    #[test]
    fn test_los_rotated_footprint() {
        // Thin wall rotated 45° crossing the x axis at the origin.
        let wall = Building {
            id: 2,
            footprint: Footprint::new(DVec2::ZERO, 20.0, 1.0).rotated(FRAC_PI_4),
            height: 3.0,
        };
        let model = model_with(vec![wall], vec![]);
        let crossing = line_of_sight(&model, &Position::new(-10.0, 0.0), &Position::new(10.0, 0.0));
        assert!(crossing.blocked);
        // The same segment shifted well past the wall's end is clear.
        let past = line_of_sight(&model, &Position::new(-10.0, -12.0), &Position::new(-2.0, -12.0));
        assert!(!past.blocked);
    }

    #[test]
    fn test_los_overlapping_blockers_union() {
        let obstacle = Obstacle {
            id: 4,
            kind: ObstacleKind::Barrier,
            footprint: Footprint::new(DVec2::new(0.0, 22.0), 2.0, 8.0),
        };
        // Building covers [15, 25], obstacle [18, 26]; union [15, 26] of 40.
        let model = model_with(vec![building(7, 0.0, 20.0, 6.0, 10.0)], vec![obstacle]);
        let s = line_of_sight(&model, &Position::new(0.0, 0.0), &Position::new(0.0, 40.0));
        assert_eq!(s.blocker_count(), 2);
        assert_eq!(s.blocking_obstacles, vec![4]);
        assert!((s.visible_fraction - (1.0 - 11.0 / 40.0)).abs() < 1e-12);
    }

    #[test]
    fn test_los_zero_length_segment_is_visible() {
        let model = model_with(vec![building(1, 0.0, 0.0, 10.0, 10.0)], vec![]);
        let p = Position::new(0.0, 0.0);
        assert_eq!(line_of_sight(&model, &p, &p), Sightline::clear());
    }

    #[test]
    fn test_los_endpoint_inside_footprint() {
        let model = model_with(vec![building(1, 0.0, 0.0, 10.0, 10.0)], vec![]);
        let s = line_of_sight(&model, &Position::new(0.0, 0.0), &Position::new(0.0, 20.0));
        assert!(s.blocked);
        assert!((s.visible_fraction - 0.75).abs() < 1e-12);
    }
}
