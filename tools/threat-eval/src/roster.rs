//! Roster files: one observer plus the hostiles it faces.
//!
//! Ground coordinates use the scene convention (`x` east, `z` north).
//! Enemy `direction` is the travel angle in degrees measured from +x toward
//! +z; it is converted to a compass heading on load.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use vigil_core::enums::UnitClass;
use vigil_core::target::TargetSnapshot;
use vigil_core::types::{Observer, Position};

use crate::CliError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    pub observer: ObserverRecord,
    #[serde(default)]
    pub enemies: Vec<EnemyRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserverRecord {
    pub x: f64,
    pub z: f64,
    /// Compass heading in degrees.
    #[serde(default)]
    pub heading: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyRecord {
    pub id: u32,
    /// Unrecognized types load as `None`, leaving that target to the
    /// heuristic fallback.
    #[serde(rename = "type", default, deserialize_with = "lenient_class")]
    pub class: Option<UnitClass>,
    pub x: f64,
    pub z: f64,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub direction: Option<f64>,
}

fn lenient_class<'de, D>(deserializer: D) -> Result<Option<UnitClass>, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.and_then(|t| {
        let parsed = serde_json::from_value(serde_json::Value::String(t.to_ascii_lowercase())).ok();
        if parsed.is_none() {
            warn!(unit_type = %t, "unknown unit type");
        }
        parsed
    }))
}

/// Travel angle (from +x toward +z) to compass heading.
pub fn direction_to_heading(direction: f64) -> f64 {
    (90.0 - direction).rem_euclid(360.0)
}

impl RosterFile {
    pub fn parse(json: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(json.trim_start_matches('\u{feff}'))?)
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn observer(&self) -> Observer {
        Observer::new(Position::new(self.observer.x, self.observer.z), self.observer.heading)
    }

    pub fn snapshots(&self) -> Vec<TargetSnapshot> {
        let observer = self.observer();
        self.enemies
            .iter()
            .map(|e| TargetSnapshot {
                id: e.id,
                position: Position::new(e.x, e.z),
                class: e.class,
                speed: e.speed,
                heading_deg: e.direction.map(direction_to_heading),
                observer,
            })
            .collect()
    }
}

/// Seeded random roster inside a `half_extent` square around the origin.
pub fn demo_roster(seed: u64, count: u32, half_extent: f64) -> Result<RosterFile, CliError> {
    if !(half_extent.is_finite() && half_extent >= 1.0) {
        return Err(CliError::InvalidArgument(format!(
            "extent must be a finite number of at least 1 m, got {half_extent}"
        )));
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let enemies = (1..=count)
        .map(|id| EnemyRecord {
            id,
            class: Some(UnitClass::ALL[rng.gen_range(0..UnitClass::ALL.len())]),
            x: round_to(rng.gen_range(-half_extent..half_extent), 1),
            z: round_to(rng.gen_range(-half_extent..half_extent), 1),
            speed: Some(round_to(rng.gen_range(0.0..15.0), 1)),
            direction: Some(round_to(rng.gen_range(0.0..360.0), 0)),
        })
        .collect();

    Ok(RosterFile {
        observer: ObserverRecord {
            x: 0.0,
            z: 0.0,
            heading: 0.0,
        },
        enemies,
    })
}

fn round_to(v: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_conversion() {
        assert_eq!(direction_to_heading(90.0), 0.0);
        assert_eq!(direction_to_heading(0.0), 90.0);
        assert_eq!(direction_to_heading(180.0), 270.0);
        assert_eq!(direction_to_heading(270.0), 180.0);
        assert_eq!(direction_to_heading(-90.0), 180.0);
    }

    #[test]
    fn test_parse_roster() {
        let json = r#"{
            "observer": {"x": 1.0, "z": 2.0, "heading": 45.0},
            "enemies": [
                {"id": 1, "type": "tank", "x": 1.0, "z": 12.0, "speed": 8.0, "direction": 270.0},
                {"id": 2, "x": -5.0, "z": 0.0}
            ]
        }"#;
        let roster = RosterFile::parse(json).unwrap();
        let targets = roster.snapshots();

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].class, Some(UnitClass::Armored));
        assert_eq!(targets[0].position, Position::new(1.0, 12.0));
        assert_eq!(targets[0].heading_deg, Some(180.0));
        assert_eq!(targets[0].observer.heading_deg, 45.0);
        assert_eq!(targets[1].class, None);
        assert_eq!(targets[1].heading_deg, None);
    }

    #[test]
    fn test_unknown_class_loads_as_missing() {
        let json = r#"{"observer": {"x": 0, "z": 0}, "enemies": [
            {"id": 1, "type": "cavalry", "x": 0, "z": 5},
            {"id": 2, "type": "Tank", "x": 0, "z": 9},
            {"id": 3, "type": null, "x": 0, "z": 9}
        ]}"#;
        let targets = RosterFile::parse(json).unwrap().snapshots();
        assert_eq!(targets[0].class, None);
        assert_eq!(targets[1].class, Some(UnitClass::Armored));
        assert_eq!(targets[2].class, None);

        let bad = r#"{"observer": {"x": 0, "z": 0}, "enemies": [{"id": 1, "type": 7, "x": 0, "z": 5}]}"#;
        assert!(matches!(RosterFile::parse(bad), Err(CliError::Json(_))));
    }

    #[test]
    fn test_unknown_class_goes_to_heuristic() {
        use vigil_core::config::EvaluatorConfig;
        use vigil_threat_ai::{Orchestrator, Selection, WeightedEvaluator};

        let json = r#"{"observer": {"x": 0, "z": 0, "heading": 0}, "enemies": [
            {"id": 1, "type": "cavalry", "x": 0, "z": 5, "speed": 3, "direction": 270},
            {"id": 2, "type": "infantry", "x": 0, "z": 40, "speed": 1, "direction": 270}
        ]}"#;
        let targets = RosterFile::parse(json).unwrap().snapshots();
        let evaluator = WeightedEvaluator::new(EvaluatorConfig::default(), None).unwrap();
        assert!(evaluator.rank(&targets).is_err());

        // Nearer and on axis, so the heuristic prefers target 1.
        assert_eq!(
            Orchestrator::new(evaluator).select_target(&targets),
            Selection::Target { id: 1, strategy: "heuristic".into() }
        );
    }

    #[test]
    fn test_demo_rejects_bad_extent() {
        for extent in [f64::INFINITY, f64::NAN, 0.5, -10.0] {
            assert!(matches!(demo_roster(1, 3, extent), Err(CliError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_demo_roster_is_seeded() {
        let a = serde_json::to_string(&demo_roster(3, 12, 50.0).unwrap()).unwrap();
        let b = serde_json::to_string(&demo_roster(3, 12, 50.0).unwrap()).unwrap();
        assert_eq!(a, b);

        let roster = demo_roster(3, 12, 50.0).unwrap();
        assert_eq!(roster.enemies.len(), 12);
        assert!(roster.enemies.iter().all(|e| e.x.abs() <= 50.0 && e.z.abs() <= 50.0));
        assert_eq!(roster.snapshots().len(), 12);
    }
}
