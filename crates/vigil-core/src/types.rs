//! Fundamental geometric types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Planar position on the battlefield (meters).
/// x = East, y = North.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Range to another position in meters.
    pub fn range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Bearing to another position in degrees, [0, 360) (0 = North, clockwise).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.atan2(dy).to_degrees().rem_euclid(360.0)
    }

    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// The friendly unit threats are evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub position: Position,
    /// Forward heading in degrees (0 = North, clockwise).
    #[serde(default)]
    pub heading_deg: f64,
}

impl Observer {
    pub fn new(position: Position, heading_deg: f64) -> Self {
        Self {
            position,
            heading_deg,
        }
    }

    /// Unsigned angle in degrees, [0, 180], between the observer's heading
    /// and the bearing to `target`.
    pub fn off_axis_deg(&self, target: &Position) -> f64 {
        angle_between(self.heading_deg, self.position.bearing_to(target))
    }
}

/// Unsigned difference between two compass angles in degrees, [0, 180].
pub fn angle_between(a_deg: f64, b_deg: f64) -> f64 {
    ((a_deg - b_deg + 180.0).rem_euclid(360.0) - 180.0).abs()
}
