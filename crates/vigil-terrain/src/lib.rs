//! Terrain system for VIGIL.
//!
//! Static urban scene model, line-of-sight occlusion against building and
//! obstacle footprints, local environment complexity, and tactical
//! position assessment.

pub use vigil_core as core;

pub mod complexity;
pub mod loader;
pub mod los;
pub mod scene;
pub mod tactical;

// Re-export key types for convenience.
pub use complexity::{complexity_at, Complexity, ComplexityLevel};
pub use loader::{load_scene, parse_scene, TerrainError};
pub use los::{line_of_sight, Sightline};
pub use scene::{Bounds, Building, Corridor, Footprint, Obstacle, ObstacleKind, TerrainModel};
pub use tactical::{assess_position, survey, Survey, SurveySummary, TacticalAdvantage, TacticalAssessment};
