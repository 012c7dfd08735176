//! Class-specific threat profiles.
//!
//! Consolidates per-class parameters for the indicator quantifiers and the
//! heuristic fallback.

use vigil_core::enums::UnitClass;
use vigil_ifs::LinguisticTerm;

/// Threat profile for a unit class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitProfile {
    /// Linguistic rating of the class's inherent lethality.
    pub type_term: LinguisticTerm,
    /// Speed (m/s) from which the class counts as maneuvering.
    pub speed_medium: f64,
    /// Speed (m/s) from which the class counts as charging.
    pub speed_high: f64,
    /// Multiplier used by the heuristic fallback.
    pub heuristic_factor: f64,
}

/// Get the profile for a given class.
pub fn get_profile(class: UnitClass) -> UnitProfile {
    use vigil_core::constants::*;

    match class {
        UnitClass::Infantry => UnitProfile {
            type_term: LinguisticTerm::MediumHigh,
            speed_medium: INFANTRY_SPEED_MEDIUM,
            speed_high: INFANTRY_SPEED_HIGH,
            heuristic_factor: HEURISTIC_DEFAULT_FACTOR,
        },
        UnitClass::Drone => UnitProfile {
            type_term: LinguisticTerm::Medium,
            speed_medium: DRONE_SPEED_MEDIUM,
            speed_high: DRONE_SPEED_HIGH,
            heuristic_factor: HEURISTIC_DEFAULT_FACTOR,
        },
        UnitClass::LightVehicle => UnitProfile {
            type_term: LinguisticTerm::VeryHigh,
            speed_medium: VEHICLE_SPEED_MEDIUM,
            speed_high: VEHICLE_SPEED_HIGH,
            heuristic_factor: HEURISTIC_LIGHT_VEHICLE_FACTOR,
        },
        UnitClass::Armored => UnitProfile {
            type_term: LinguisticTerm::Critical,
            speed_medium: VEHICLE_SPEED_MEDIUM,
            speed_high: VEHICLE_SPEED_HIGH,
            heuristic_factor: HEURISTIC_ARMORED_FACTOR,
        },
    }
}
