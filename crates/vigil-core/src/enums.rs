//! Enumeration types used throughout the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hostile unit classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitClass {
    /// Dismounted soldier.
    #[serde(alias = "soldier", alias = "armed_personnel")]
    Infantry,
    /// Small unmanned aircraft.
    #[serde(alias = "uav")]
    Drone,
    /// Wheeled or light tracked vehicle (IFV class).
    #[serde(alias = "ifv", alias = "apc")]
    LightVehicle,
    /// Main battle tank class.
    #[serde(alias = "tank", alias = "heavy")]
    Armored,
}

impl UnitClass {
    pub const ALL: [UnitClass; 4] = [
        UnitClass::Infantry,
        UnitClass::Drone,
        UnitClass::LightVehicle,
        UnitClass::Armored,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UnitClass::Infantry => "infantry",
            UnitClass::Drone => "drone",
            UnitClass::LightVehicle => "light_vehicle",
            UnitClass::Armored => "armored",
        }
    }
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Discrete threat bucket, ordered from least to most threatening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    pub const ALL: [ThreatLevel; 4] = [
        ThreatLevel::Critical,
        ThreatLevel::High,
        ThreatLevel::Medium,
        ThreatLevel::Low,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
            ThreatLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The six threat indicators, in aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Distance,
    Type,
    Speed,
    Angle,
    Visibility,
    Environment,
}

impl Indicator {
    pub const ALL: [Indicator; 6] = [
        Indicator::Distance,
        Indicator::Type,
        Indicator::Speed,
        Indicator::Angle,
        Indicator::Visibility,
        Indicator::Environment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Indicator::Distance => "distance",
            Indicator::Type => "type",
            Indicator::Speed => "speed",
            Indicator::Angle => "angle",
            Indicator::Visibility => "visibility",
            Indicator::Environment => "environment",
        }
    }

    /// Position in [`Indicator::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How surrounding cover changes the environment indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentPolicy {
    /// Exposed targets can engage freely: open ground reads as more threatening,
    /// dense cover as less threatening but more uncertain.
    #[default]
    OpenGroundRaisesThreat,
    /// Covered targets can ambush: dense cover reads as more threatening.
    CoverRaisesThreat,
}
