//! The six indicator quantifiers.
//!
//! Each maps one raw attribute onto a fuzzy value through a membership curve
//! built once from the evaluator config. Inputs are assumed present and
//! finite; the evaluator checks that before calling in.

use serde::{Deserialize, Serialize};
use vigil_core::config::{AngleBands, DistanceBands, EvaluatorConfig, LevelCuts};
use vigil_core::constants::STATIC_SPEED;
use vigil_core::enums::{EnvironmentPolicy, Indicator, ThreatLevel, UnitClass};
use vigil_core::error::ThreatError;
use vigil_core::types::{angle_between, Position};
use vigil_ifs::{FuzzyValue, LinguisticTerm, MembershipCurve};
use vigil_terrain::{Complexity, ComplexityLevel, Sightline};

use crate::profiles::{get_profile, UnitProfile};

/// Static targets: low threat, high hesitancy (possible ambush).
const STATIC_VALUE: (f64, f64) = (0.25, 0.50);

/// Unobstructed line of sight.
const VISIBLE_VALUE: (f64, f64) = (0.95, 0.03);

/// Environment reading when no terrain model is available.
const NEUTRAL_ENVIRONMENT: (f64, f64) = (0.50, 0.40);

/// Distance band a target falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceZone {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedCategory {
    Static,
    Low,
    Medium,
    High,
}

/// How a target's course relates to the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApproachCategory {
    Approaching,
    Flanking,
    Lateral,
    Retreating,
}

/// Raw inputs behind an indicator value, with the band they fell into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorDetail {
    Distance {
        distance: f64,
        zone: DistanceZone,
    },
    Type {
        class: UnitClass,
        term: LinguisticTerm,
    },
    Speed {
        speed: f64,
        class: UnitClass,
        category: SpeedCategory,
    },
    Angle {
        /// Bearing from target to observer (degrees).
        bearing_to_observer: f64,
        angle_off: f64,
        category: ApproachCategory,
    },
    Visibility {
        blocked: bool,
        visible_fraction: f64,
        blocker_count: usize,
        terrain_known: bool,
    },
    Environment {
        combined_density: f64,
        level: Option<ComplexityLevel>,
        in_corridor: bool,
        policy: EnvironmentPolicy,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub indicator: Indicator,
    pub value: FuzzyValue,
    pub threat_score: f64,
    pub threat_level: ThreatLevel,
    pub detail: IndicatorDetail,
}

/// Prebuilt membership curves plus the bands and cut-points they use.
#[derive(Debug, Clone)]
pub struct Quantifiers {
    distance_bands: DistanceBands,
    angle_bands: AngleBands,
    levels: LevelCuts,
    policy: EnvironmentPolicy,
    distance: MembershipCurve,
    angle: MembershipCurve,
    /// Indexed like [`UnitClass::ALL`].
    speed: [MembershipCurve; 4],
    visibility_blocked: MembershipCurve,
    environment: MembershipCurve,
}

impl Quantifiers {
    pub fn new(config: &EvaluatorConfig) -> Result<Self, ThreatError> {
        let d = config.distance_bands;
        let distance = MembershipCurve::new(&[
            (0.0, 0.95, 0.02),
            (d.critical, 0.90, 0.06),
            (d.high, 0.70, 0.20),
            (d.medium, 0.45, 0.45),
            (d.low, 0.25, 0.65),
            (d.low * 2.0, 0.10, 0.80),
        ])?;

        let a = config.angle_bands;
        let angle = MembershipCurve::new(&[
            (0.0, 0.95, 0.02),
            (a.direct, 0.80, 0.10),
            (a.oblique, 0.50, 0.40),
            (a.lateral, 0.30, 0.60),
            (180.0, 0.10, 0.80),
        ])?;

        let speed = [
            speed_curve(&get_profile(UnitClass::ALL[0]))?,
            speed_curve(&get_profile(UnitClass::ALL[1]))?,
            speed_curve(&get_profile(UnitClass::ALL[2]))?,
            speed_curve(&get_profile(UnitClass::ALL[3]))?,
        ];

        let visibility_blocked = MembershipCurve::new(&[(0.0, 0.10, 0.50), (1.0, 0.60, 0.25)])?;

        let environment = match config.environment_policy {
            EnvironmentPolicy::OpenGroundRaisesThreat => MembershipCurve::new(&[
                (0.0, 0.90, 0.05),
                (0.3, 0.60, 0.25),
                (0.6, 0.40, 0.35),
                (1.0, 0.20, 0.45),
            ])?,
            EnvironmentPolicy::CoverRaisesThreat => MembershipCurve::new(&[
                (0.0, 0.35, 0.45),
                (0.3, 0.50, 0.35),
                (0.6, 0.65, 0.20),
                (1.0, 0.80, 0.10),
            ])?,
        };

        Ok(Self {
            distance_bands: d,
            angle_bands: a,
            levels: config.indicator_levels,
            policy: config.environment_policy,
            distance,
            angle,
            speed,
            visibility_blocked,
            environment,
        })
    }

    fn result(&self, indicator: Indicator, value: FuzzyValue, detail: IndicatorDetail) -> IndicatorResult {
        let threat_score = value.score();
        IndicatorResult {
            indicator,
            value,
            threat_score,
            threat_level: self.levels.level(threat_score),
            detail,
        }
    }

    /// Nearer is more threatening.
    pub fn distance(&self, distance: f64) -> IndicatorResult {
        let b = &self.distance_bands;
        let zone = if distance <= b.critical {
            DistanceZone::Critical
        } else if distance <= b.high {
            DistanceZone::High
        } else if distance <= b.medium {
            DistanceZone::Medium
        } else {
            DistanceZone::Low
        };
        self.result(
            Indicator::Distance,
            self.distance.eval(distance),
            IndicatorDetail::Distance { distance, zone },
        )
    }

    /// Fixed rating per class.
    pub fn unit_type(&self, class: UnitClass) -> IndicatorResult {
        let term = get_profile(class).type_term;
        self.result(Indicator::Type, term.value(), IndicatorDetail::Type { class, term })
    }

    /// Faster than the class's thresholds is more threatening; static
    /// targets get a low but hesitant reading.
    pub fn speed(&self, speed: f64, class: UnitClass) -> IndicatorResult {
        let profile = get_profile(class);
        let (value, category) = if speed < STATIC_SPEED {
            (fixed(STATIC_VALUE), SpeedCategory::Static)
        } else {
            let category = if speed < profile.speed_medium {
                SpeedCategory::Low
            } else if speed < profile.speed_high {
                SpeedCategory::Medium
            } else {
                SpeedCategory::High
            };
            (self.speed[class_slot(class)].eval(speed), category)
        };
        self.result(
            Indicator::Speed,
            value,
            IndicatorDetail::Speed { speed, class, category },
        )
    }

    /// Heading straight at the observer is most threatening, heading away least.
    pub fn angle(&self, target: &Position, heading_deg: f64, observer: &Position) -> IndicatorResult {
        let bearing_to_observer = target.bearing_to(observer);
        let angle_off = angle_between(heading_deg, bearing_to_observer);

        let b = &self.angle_bands;
        let category = if angle_off <= b.direct {
            ApproachCategory::Approaching
        } else if angle_off <= b.oblique {
            ApproachCategory::Flanking
        } else if angle_off <= b.lateral {
            ApproachCategory::Lateral
        } else {
            ApproachCategory::Retreating
        };
        self.result(
            Indicator::Angle,
            self.angle.eval(angle_off),
            IndicatorDetail::Angle {
                bearing_to_observer,
                angle_off,
                category,
            },
        )
    }

    /// Without a sightline (no terrain) the target counts as fully visible.
    pub fn visibility(&self, sightline: Option<&Sightline>) -> IndicatorResult {
        let (value, detail) = match sightline {
            Some(s) if s.blocked => (
                self.visibility_blocked.eval(s.visible_fraction),
                IndicatorDetail::Visibility {
                    blocked: true,
                    visible_fraction: s.visible_fraction,
                    blocker_count: s.blocker_count(),
                    terrain_known: true,
                },
            ),
            other => (
                fixed(VISIBLE_VALUE),
                IndicatorDetail::Visibility {
                    blocked: false,
                    visible_fraction: 1.0,
                    blocker_count: 0,
                    terrain_known: other.is_some(),
                },
            ),
        };
        self.result(Indicator::Visibility, value, detail)
    }

    /// Without complexity data (no terrain) the reading is neutral.
    pub fn environment(&self, complexity: Option<&Complexity>) -> IndicatorResult {
        let (value, detail) = match complexity {
            Some(c) => (
                self.environment.eval(c.combined_density),
                IndicatorDetail::Environment {
                    combined_density: c.combined_density,
                    level: Some(c.level),
                    in_corridor: c.in_corridor,
                    policy: self.policy,
                },
            ),
            None => (
                fixed(NEUTRAL_ENVIRONMENT),
                IndicatorDetail::Environment {
                    combined_density: 0.0,
                    level: None,
                    in_corridor: false,
                    policy: self.policy,
                },
            ),
        };
        self.result(Indicator::Environment, value, detail)
    }
}

fn speed_curve(p: &UnitProfile) -> Result<MembershipCurve, ThreatError> {
    MembershipCurve::new(&[
        (STATIC_SPEED, 0.30, 0.60),
        (p.speed_medium, 0.50, 0.30),
        (p.speed_high, 0.65, 0.25),
        (p.speed_high * 2.0, 0.90, 0.05),
    ])
    .map_err(ThreatError::from)
}

fn class_slot(class: UnitClass) -> usize {
    match class {
        UnitClass::Infantry => 0,
        UnitClass::Drone => 1,
        UnitClass::LightVehicle => 2,
        UnitClass::Armored => 3,
    }
}

/// Compile-time constant pairs, all valid.
fn fixed((mu, nu): (f64, f64)) -> FuzzyValue {
    FuzzyValue::clamped(mu, nu)
}
