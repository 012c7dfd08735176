//! TerrainModel: immutable scene of buildings, obstacles and corridors.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::warn;
use vigil_core::types::Position;

/// Oriented rectangle on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub center: DVec2,
    /// Half of (width along local x, depth along local y).
    pub half_extents: DVec2,
    /// Counter-clockwise rotation of the local frame (radians).
    pub rotation: f64,
}

impl Footprint {
    /// Axis-aligned footprint from center and full width/depth.
    pub fn new(center: DVec2, width: f64, depth: f64) -> Self {
        Self {
            center,
            half_extents: DVec2::new(width / 2.0, depth / 2.0),
            rotation: 0.0,
        }
    }

    pub fn rotated(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Positive, finite extents and a finite pose.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.rotation.is_finite()
            && self.half_extents.is_finite()
            && self.half_extents.x > 0.0
            && self.half_extents.y > 0.0
    }

    /// Map a world point into the footprint's local frame (center at origin).
    pub fn to_local(&self, p: DVec2) -> DVec2 {
        let (sin, cos) = self.rotation.sin_cos();
        let d = p - self.center;
        DVec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos)
    }

    /// Closed containment test.
    pub fn contains(&self, p: DVec2) -> bool {
        let l = self.to_local(p);
        l.x.abs() <= self.half_extents.x && l.y.abs() <= self.half_extents.y
    }

    /// Whether any part of the footprint lies within `radius` of `p`.
    pub fn within(&self, p: DVec2, radius: f64) -> bool {
        let l = self.to_local(p);
        let nearest = l.clamp(-self.half_extents, self.half_extents);
        l.distance_squared(nearest) <= radius * radius
    }

    pub fn area(&self) -> f64 {
        4.0 * self.half_extents.x * self.half_extents.y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: u32,
    pub footprint: Footprint,
    /// Roof height (m). Informational; occlusion is planar.
    pub height: f64,
}

/// Obstacle category tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Cover,
    Barrier,
    Vehicle,
    Debris,
    #[default]
    #[serde(other)]
    Other,
}

impl ObstacleKind {
    /// Case-insensitive tag lookup; unknown tags map to `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "cover" => ObstacleKind::Cover,
            "barrier" | "wall" => ObstacleKind::Barrier,
            "vehicle" => ObstacleKind::Vehicle,
            "debris" | "rubble" => ObstacleKind::Debris,
            _ => ObstacleKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub footprint: Footprint,
}

/// Alley or street: a segment with a width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub id: u32,
    pub start: DVec2,
    pub end: DVec2,
    pub width: f64,
}

impl Corridor {
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.width.is_finite()
            && self.width > 0.0
            && self.start.distance_squared(self.end) > 0.0
    }

    /// Strictly inside the corridor's half-width of its centerline.
    pub fn contains(&self, p: DVec2) -> bool {
        let seg = self.end - self.start;
        let t = ((p - self.start).dot(seg) / seg.length_squared()).clamp(0.0, 1.0);
        let closest = self.start + seg * t;
        p.distance(closest) < self.width / 2.0
    }
}

/// Axis-aligned scene extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn contains(&self, p: &Position) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Static battlefield scene. Built once, then shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TerrainModel {
    buildings: Vec<Building>,
    obstacles: Vec<Obstacle>,
    corridors: Vec<Corridor>,
    bounds: Option<Bounds>,
}

impl TerrainModel {
    /// Build a model, dropping degenerate geometry with a warning.
    pub fn new(
        buildings: Vec<Building>,
        obstacles: Vec<Obstacle>,
        corridors: Vec<Corridor>,
        bounds: Option<Bounds>,
    ) -> Self {
        let buildings = buildings
            .into_iter()
            .filter(|b| {
                let ok = b.footprint.is_valid();
                if !ok {
                    warn!(id = b.id, footprint = ?b.footprint, "dropping degenerate building");
                }
                ok
            })
            .collect();
        let obstacles = obstacles
            .into_iter()
            .filter(|o| {
                let ok = o.footprint.is_valid();
                if !ok {
                    warn!(id = o.id, footprint = ?o.footprint, "dropping degenerate obstacle");
                }
                ok
            })
            .collect();
        let corridors = corridors
            .into_iter()
            .filter(|c| {
                let ok = c.is_valid();
                if !ok {
                    warn!(id = c.id, "dropping degenerate corridor");
                }
                ok
            })
            .collect();

        Self {
            buildings,
            obstacles,
            corridors,
            bounds,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty() && self.obstacles.is_empty() && self.corridors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_rotated_footprint_contains() {
        // 10 x 2 bar rotated 45°: (3, 3) lies on its long axis.
        let bar = Footprint::new(DVec2::ZERO, 10.0, 2.0).rotated(FRAC_PI_4);
        assert!(bar.contains(DVec2::new(3.0, 3.0)));
        assert!(!bar.contains(DVec2::new(4.5, 0.0)));

        let axis = Footprint::new(DVec2::ZERO, 10.0, 2.0);
        assert!(axis.contains(DVec2::new(4.5, 0.0)));
    }

    #[test]
    fn test_footprint_within_radius() {
        let fp = Footprint::new(DVec2::new(10.0, 0.0), 4.0, 4.0);
        assert!(fp.within(DVec2::ZERO, 8.0));
        assert!(!fp.within(DVec2::ZERO, 7.9));
        assert_eq!(fp.area(), 16.0);
    }

    #[test]
    fn test_degenerate_geometry_is_dropped() {
        let model = TerrainModel::new(
            vec![
                Building { id: 1, footprint: Footprint::new(DVec2::ZERO, 4.0, 4.0), height: 5.0 },
                Building { id: 2, footprint: Footprint::new(DVec2::ZERO, 0.0, 4.0), height: 5.0 },
            ],
            vec![Obstacle {
                id: 9,
                kind: ObstacleKind::Cover,
                footprint: Footprint::new(DVec2::new(f64::NAN, 0.0), 1.0, 1.0),
            }],
            vec![Corridor { id: 3, start: DVec2::ZERO, end: DVec2::ZERO, width: 4.0 }],
            None,
        );
        assert_eq!(model.buildings().len(), 1);
        assert!(model.obstacles().is_empty());
        assert!(model.corridors().is_empty());
    }

    #[test]
    fn test_corridor_contains() {
        let c = Corridor { id: 1, start: DVec2::ZERO, end: DVec2::new(30.0, 0.0), width: 5.0 };
        assert!(c.contains(DVec2::new(15.0, 2.0)));
        assert!(!c.contains(DVec2::new(15.0, 2.5)));
        assert!(!c.contains(DVec2::new(-3.0, 0.0)));
    }

    #[test]
    fn test_obstacle_tags() {
        assert_eq!(ObstacleKind::from_tag("Barrier"), ObstacleKind::Barrier);
        assert_eq!(ObstacleKind::from_tag("crate"), ObstacleKind::Other);
        let kind: ObstacleKind = serde_json::from_str("\"sandbags\"").unwrap();
        assert_eq!(kind, ObstacleKind::Other);
    }
}
