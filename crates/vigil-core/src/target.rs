//! Per-target input snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::UnitClass;
use crate::types::{Observer, Position};

/// Everything the engine knows about one hostile at evaluation time.
///
/// Optional attributes are only required by the indicators that read them;
/// a missing one surfaces as `ThreatError::MissingAttribute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSnapshot {
    pub id: u32,
    pub position: Position,
    #[serde(default)]
    pub class: Option<UnitClass>,
    /// Ground speed (m/s).
    #[serde(default)]
    pub speed: Option<f64>,
    /// Direction of travel in degrees (0 = North, clockwise).
    #[serde(default)]
    pub heading_deg: Option<f64>,
    pub observer: Observer,
}

impl TargetSnapshot {
    pub fn new(id: u32, position: Position, observer: Observer) -> Self {
        Self {
            id,
            position,
            class: None,
            speed: None,
            heading_deg: None,
            observer,
        }
    }

    pub fn with_class(mut self, class: UnitClass) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_heading(mut self, heading_deg: f64) -> Self {
        self.heading_deg = Some(heading_deg);
        self
    }

    /// Planar distance between target and observer (m).
    pub fn distance(&self) -> f64 {
        self.position.range_to(&self.observer.position)
    }
}
