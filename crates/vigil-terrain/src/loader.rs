//! JSON scene loading.
//!
//! Scene files describe the ground plane in x/z coordinates; z maps onto
//! the engine's northward y axis. Footprints are given by center, full
//! width (x) and depth (z), and an optional rotation in degrees.

use std::path::{Path, PathBuf};

use glam::DVec2;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::scene::{Bounds, Building, Corridor, Footprint, Obstacle, ObstacleKind, TerrainModel};

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("failed to read scene {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scene: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
struct SceneFile {
    #[serde(default)]
    terrain: TerrainSection,
}

#[derive(Debug, Default, Deserialize)]
struct TerrainSection {
    #[serde(default)]
    buildings: Vec<BuildingRecord>,
    #[serde(default)]
    obstacles: Vec<ObstacleRecord>,
    #[serde(default)]
    alleys: Vec<AlleyRecord>,
    #[serde(default)]
    terrain_info: Option<TerrainInfo>,
}

#[derive(Debug, Deserialize)]
struct BuildingRecord {
    #[serde(default)]
    id: u32,
    x: f64,
    z: f64,
    width: f64,
    depth: f64,
    #[serde(default)]
    height: f64,
    #[serde(default)]
    rotation: f64,
}

#[derive(Debug, Deserialize)]
struct ObstacleRecord {
    #[serde(default)]
    id: u32,
    #[serde(rename = "type", default)]
    kind: String,
    x: f64,
    z: f64,
    width: f64,
    depth: f64,
    #[serde(default)]
    rotation: f64,
}

#[derive(Debug, Deserialize)]
struct AlleyRecord {
    #[serde(default)]
    id: u32,
    start_x: f64,
    start_z: f64,
    end_x: f64,
    end_z: f64,
    width: f64,
}

#[derive(Debug, Deserialize)]
struct TerrainInfo {
    #[serde(default = "default_min")]
    min_x: f64,
    #[serde(default = "default_max")]
    max_x: f64,
    #[serde(default = "default_min")]
    min_z: f64,
    #[serde(default = "default_max")]
    max_z: f64,
}

fn default_min() -> f64 {
    -50.0
}

fn default_max() -> f64 {
    50.0
}

fn footprint(x: f64, z: f64, width: f64, depth: f64, rotation_deg: f64) -> Footprint {
    Footprint::new(DVec2::new(x, z), width, depth).rotated(rotation_deg.to_radians())
}

/// Parse a scene document. A missing `terrain` section yields an empty scene.
pub fn parse_scene(json: &str) -> Result<TerrainModel, TerrainError> {
    let file: SceneFile = serde_json::from_str(json)?;
    let t = file.terrain;

    let buildings = t
        .buildings
        .into_iter()
        .map(|b| Building {
            id: b.id,
            footprint: footprint(b.x, b.z, b.width, b.depth, b.rotation),
            height: b.height,
        })
        .collect();
    let obstacles = t
        .obstacles
        .into_iter()
        .map(|o| Obstacle {
            id: o.id,
            kind: ObstacleKind::from_tag(&o.kind),
            footprint: footprint(o.x, o.z, o.width, o.depth, o.rotation),
        })
        .collect();
    let corridors = t
        .alleys
        .into_iter()
        .map(|a| Corridor {
            id: a.id,
            start: DVec2::new(a.start_x, a.start_z),
            end: DVec2::new(a.end_x, a.end_z),
            width: a.width,
        })
        .collect();
    let bounds = t.terrain_info.map(|i| Bounds {
        min: DVec2::new(i.min_x, i.min_z),
        max: DVec2::new(i.max_x, i.max_z),
    });

    Ok(TerrainModel::new(buildings, obstacles, corridors, bounds))
}

/// Read and parse a scene file.
pub fn load_scene(path: &Path) -> Result<TerrainModel, TerrainError> {
    let text = std::fs::read_to_string(path).map_err(|source| TerrainError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Editors on some platforms prepend a byte-order mark.
    let model = parse_scene(text.trim_start_matches('\u{feff}'))?;
    info!(
        path = %path.display(),
        buildings = model.buildings().len(),
        obstacles = model.obstacles().len(),
        corridors = model.corridors().len(),
        "loaded scene"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "terrain": {
            "buildings": [
                {"id": 1, "x": 10, "z": 15, "width": 8, "depth": 12, "height": 10},
                {"id": 2, "x": -15, "z": 20, "width": 10, "depth": 10, "height": 8, "rotation": 30},
                {"id": 3, "x": 0, "z": 0, "width": 0, "depth": 5}
            ],
            "obstacles": [
                {"id": 1, "type": "Cover", "x": 5, "z": 5, "width": 2, "depth": 2},
                {"id": 2, "type": "Barrier", "x": 20, "z": 10, "width": 3, "depth": 1}
            ],
            "alleys": [
                {"id": 1, "start_x": 0, "start_z": 0, "end_x": 30, "end_z": 0, "width": 5}
            ],
            "terrain_info": {"min_x": -60, "max_x": 60}
        }
    }"#;

    #[test]
    fn test_parse_scene() {
        let model = parse_scene(SCENE).unwrap();
        // The zero-width building is dropped.
        assert_eq!(model.buildings().len(), 2);
        assert_eq!(model.obstacles()[0].kind, ObstacleKind::Cover);
        assert_eq!(model.obstacles()[1].kind, ObstacleKind::Barrier);
        assert_eq!(model.corridors().len(), 1);

        let b = &model.buildings()[0];
        assert_eq!(b.footprint.center, DVec2::new(10.0, 15.0));
        assert_eq!(b.footprint.half_extents, DVec2::new(4.0, 6.0));
        assert!((model.buildings()[1].footprint.rotation - 30f64.to_radians()).abs() < 1e-12);

        let bounds = model.bounds().unwrap();
        assert_eq!(bounds.min, DVec2::new(-60.0, -50.0));
        assert_eq!(bounds.max, DVec2::new(60.0, 50.0));
    }

    #[test]
    fn test_parse_scene_without_terrain_is_empty() {
        let model = parse_scene("{}").unwrap();
        assert!(model.is_empty());
        assert!(model.bounds().is_none());
    }

    #[test]
    fn test_parse_scene_errors() {
        assert!(matches!(parse_scene("{\"terrain\": ["), Err(TerrainError::Parse(_))));
        let missing = parse_scene(r#"{"terrain":{"buildings":[{"id":1,"x":0}]}}"#);
        assert!(matches!(missing, Err(TerrainError::Parse(_))));
    }

    #[test]
    fn test_load_scene_missing_file() {
        let err = load_scene(Path::new("/nonexistent/vigil-scene.json")).unwrap_err();
        assert!(matches!(err, TerrainError::Io { .. }));
        assert!(err.to_string().contains("vigil-scene.json"));
    }
}
