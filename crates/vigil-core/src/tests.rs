#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::constants::MAX_COMPLEXITY_RADIUS;
    use crate::enums::*;
    use crate::error::ThreatError;
    use crate::target::TargetSnapshot;
    use crate::types::{angle_between, Observer, Position};

    #[test]
    fn test_unit_class_aliases() {
        let cases = [
            ("\"soldier\"", UnitClass::Infantry),
            ("\"infantry\"", UnitClass::Infantry),
            ("\"ifv\"", UnitClass::LightVehicle),
            ("\"tank\"", UnitClass::Armored),
            ("\"uav\"", UnitClass::Drone),
        ];
        for (json, expected) in cases {
            let parsed: UnitClass = serde_json::from_str(json).unwrap();
            assert_eq!(parsed, expected, "{json}");
        }
        for class in UnitClass::ALL {
            let json = serde_json::to_string(&class).unwrap();
            assert_eq!(json, format!("\"{}\"", class.name()));
        }
    }

    #[test]
    fn test_threat_level_ordering() {
        assert!(ThreatLevel::Critical > ThreatLevel::High);
        assert!(ThreatLevel::High > ThreatLevel::Medium);
        assert!(ThreatLevel::Medium > ThreatLevel::Low);
    }

    #[test]
    fn test_indicator_index_matches_all() {
        for (i, ind) in Indicator::ALL.iter().enumerate() {
            assert_eq!(ind.index(), i);
        }
    }

    #[test]
    fn test_bearing_compass_convention() {
        let origin = Position::new(0.0, 0.0);
        assert!((origin.bearing_to(&Position::new(0.0, 10.0)) - 0.0).abs() < 1e-9);
        assert!((origin.bearing_to(&Position::new(10.0, 0.0)) - 90.0).abs() < 1e-9);
        assert!((origin.bearing_to(&Position::new(0.0, -10.0)) - 180.0).abs() < 1e-9);
        assert!((origin.bearing_to(&Position::new(-10.0, 0.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_between_wraps() {
        assert!((angle_between(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((angle_between(10.0, 350.0) - 20.0).abs() < 1e-9);
        assert!((angle_between(0.0, 180.0) - 180.0).abs() < 1e-9);
        assert!((angle_between(720.0, 0.0)).abs() < 1e-9);
    }

    #[test]
    fn test_observer_off_axis() {
        let obs = Observer::new(Position::new(0.0, 0.0), 90.0);
        assert!(obs.off_axis_deg(&Position::new(10.0, 0.0)).abs() < 1e-9);
        assert!((obs.off_axis_deg(&Position::new(0.0, 10.0)) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_snapshot_builder_and_distance() {
        let t = TargetSnapshot::new(7, Position::new(3.0, 4.0), Observer::default())
            .with_class(UnitClass::Drone)
            .with_speed(4.0)
            .with_heading(180.0);
        assert_eq!(t.class, Some(UnitClass::Drone));
        assert!((t.distance() - 5.0).abs() < 1e-12);

        let json = r#"{"id":1,"position":{"x":1.0,"y":2.0},"observer":{"position":{"x":0.0,"y":0.0}}}"#;
        let parsed: TargetSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.speed, None);
        assert_eq!(parsed.observer.heading_deg, 0.0);
    }

    #[test]
    fn test_weight_presets_are_valid() {
        for w in [WeightVector::standard(), WeightVector::close_quarters(), WeightVector::urban()] {
            w.validate().unwrap();
        }
        assert_eq!(WeightVector::preset("Close-Quarters"), Some(WeightVector::close_quarters()));
        assert_eq!(WeightVector::preset("nope"), None);
    }

    #[test]
    fn test_weight_validation() {
        let bad_sum = WeightVector::from_array([0.5, 0.5, 0.5, 0.0, 0.0, 0.0]);
        assert!(matches!(bad_sum.validate(), Err(ThreatError::InvalidWeights(_))));

        let negative = WeightVector::from_array([1.2, -0.2, 0.0, 0.0, 0.0, 0.0]);
        assert!(matches!(negative.validate(), Err(ThreatError::InvalidWeights(_))));

        let w = WeightVector::normalized([3.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert!((w.distance - 0.75).abs() < 1e-12);
        assert_eq!(w.get(Indicator::Type), 0.25);
        w.validate().unwrap();

        assert!(WeightVector::normalized([0.0; 6]).is_err());
    }

    #[test]
    fn test_level_cuts_are_inclusive() {
        let cuts = LevelCuts::indicator_default();
        assert_eq!(cuts.level(0.7), ThreatLevel::Critical);
        assert_eq!(cuts.level(0.69), ThreatLevel::High);
        assert_eq!(cuts.level(0.0), ThreatLevel::Medium);
        assert_eq!(cuts.level(-0.01), ThreatLevel::Low);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let cfg = EvaluatorConfig::from_json_str(
            r#"{"environment_policy":"cover_raises_threat","distance_bands":{"critical":5.0}}"#,
        )
        .unwrap();
        assert_eq!(cfg.environment_policy, EnvironmentPolicy::CoverRaisesThreat);
        assert_eq!(cfg.distance_bands.critical, 5.0);
        assert_eq!(cfg.distance_bands.high, 20.0);
        assert_eq!(cfg.weights, WeightVector::standard());
    }

    #[test]
    fn test_config_rejects_bad_bands() {
        let err = EvaluatorConfig::from_json_str(r#"{"distance_bands":{"critical":30.0}}"#);
        assert!(matches!(err, Err(ThreatError::InvalidConfig(_))));

        let err = EvaluatorConfig::from_json_str(r#"{"angle_bands":{"lateral":200.0}}"#);
        assert!(matches!(err, Err(ThreatError::InvalidConfig(_))));

        let err = EvaluatorConfig::from_json_str("{not json");
        assert!(matches!(err, Err(ThreatError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_complexity_radius_is_capped() {
        let ok = EvaluatorConfig::from_json_str(&format!(r#"{{"complexity_radius":{MAX_COMPLEXITY_RADIUS}}}"#));
        assert!(ok.is_ok());

        for radius in ["1000000.0", "0.0", "-5.0"] {
            let err = EvaluatorConfig::from_json_str(&format!(r#"{{"complexity_radius":{radius}}}"#));
            assert!(matches!(err, Err(ThreatError::InvalidConfig(_))), "radius {radius}");
        }

        let mut cfg = EvaluatorConfig::default();
        cfg.complexity_radius = f64::INFINITY;
        assert!(cfg.validate().is_err());
        cfg.complexity_radius = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let cfg = EvaluatorConfig::default().with_weights(WeightVector::urban());
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"type\":"));
        assert_eq!(EvaluatorConfig::from_json_str(&json).unwrap(), cfg);
    }

    #[test]
    fn test_error_recoverability() {
        let missing = ThreatError::MissingAttribute { target_id: 3, attribute: "speed" };
        assert!(missing.is_recoverable());
        assert!(!ThreatError::InvalidWeights("x".into()).is_recoverable());
        let fuzzy: ThreatError = vigil_ifs::FuzzyError::EmptyInput.into();
        assert!(!fuzzy.is_recoverable());
    }
}
