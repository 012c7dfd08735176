//! Evaluator configuration: weights, bands, level cut-points, policy.
//!
//! Every section defaults to the values in [`crate::constants`], so a JSON
//! file only needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use vigil_ifs::WEIGHT_SUM_TOLERANCE;

use crate::constants::*;
use crate::enums::{EnvironmentPolicy, Indicator, ThreatLevel};
use crate::error::ThreatError;

/// Relative importance of each indicator. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub distance: f64,
    #[serde(rename = "type")]
    pub unit_type: f64,
    pub speed: f64,
    pub angle: f64,
    pub visibility: f64,
    pub environment: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::standard()
    }
}

impl WeightVector {
    /// General-purpose weighting.
    pub fn standard() -> Self {
        Self::from_array([0.30, 0.25, 0.20, 0.15, 0.06, 0.04])
    }

    /// Short-range fights, where proximity dominates.
    pub fn close_quarters() -> Self {
        Self::from_array([0.40, 0.20, 0.15, 0.15, 0.06, 0.04])
    }

    /// Built-up areas, where sightlines and cover matter more.
    pub fn urban() -> Self {
        Self::from_array([0.25, 0.20, 0.15, 0.15, 0.15, 0.10])
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "standard" => Some(Self::standard()),
            "close_quarters" => Some(Self::close_quarters()),
            "urban" => Some(Self::urban()),
            _ => None,
        }
    }

    /// Rescale raw non-negative weights (in [`Indicator::ALL`] order) to sum to 1.
    pub fn normalized(raw: [f64; 6]) -> Result<Self, ThreatError> {
        if let Some(w) = raw.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(ThreatError::InvalidWeights(format!("weight {w} is negative or non-finite")));
        }
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return Err(ThreatError::InvalidWeights("weights sum to zero".into()));
        }
        Ok(Self::from_array(raw.map(|w| w / total)))
    }

    pub fn from_array(w: [f64; 6]) -> Self {
        Self {
            distance: w[0],
            unit_type: w[1],
            speed: w[2],
            angle: w[3],
            visibility: w[4],
            environment: w[5],
        }
    }

    /// Weights in [`Indicator::ALL`] order.
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.distance,
            self.unit_type,
            self.speed,
            self.angle,
            self.visibility,
            self.environment,
        ]
    }

    pub fn get(&self, indicator: Indicator) -> f64 {
        self.as_array()[indicator.index()]
    }

    pub fn validate(&self) -> Result<(), ThreatError> {
        for (indicator, w) in Indicator::ALL.iter().zip(self.as_array()) {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(ThreatError::InvalidWeights(format!(
                    "{indicator} weight {w} outside [0, 1]"
                )));
            }
        }
        let sum: f64 = self.as_array().iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ThreatError::InvalidWeights(format!("weights sum to {sum}, expected 1.0")));
        }
        Ok(())
    }
}

/// Distance zone boundaries (m), strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceBands {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for DistanceBands {
    fn default() -> Self {
        Self {
            critical: DISTANCE_CRITICAL,
            high: DISTANCE_HIGH,
            medium: DISTANCE_MEDIUM,
            low: DISTANCE_LOW,
        }
    }
}

impl DistanceBands {
    fn validate(&self) -> Result<(), ThreatError> {
        let b = [self.critical, self.high, self.medium, self.low];
        if b.iter().any(|x| !x.is_finite()) || b[0] <= 0.0 || b.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ThreatError::InvalidConfig(format!(
                "distance bands must be positive and strictly increasing, got {b:?}"
            )));
        }
        Ok(())
    }
}

/// Angle-off band boundaries (degrees), strictly increasing within (0, 180).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleBands {
    pub direct: f64,
    pub oblique: f64,
    pub lateral: f64,
}

impl Default for AngleBands {
    fn default() -> Self {
        Self {
            direct: ANGLE_DIRECT,
            oblique: ANGLE_OBLIQUE,
            lateral: ANGLE_LATERAL,
        }
    }
}

impl AngleBands {
    fn validate(&self) -> Result<(), ThreatError> {
        let b = [self.direct, self.oblique, self.lateral];
        let ordered = b[0] > 0.0 && b[0] < b[1] && b[1] < b[2] && b[2] < 180.0;
        if !ordered {
            return Err(ThreatError::InvalidConfig(format!(
                "angle bands must satisfy 0 < direct < oblique < lateral < 180, got {b:?}"
            )));
        }
        Ok(())
    }
}

/// Score cut-points for bucketing into [`ThreatLevel`]s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelCuts {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
}

impl LevelCuts {
    pub fn indicator_default() -> Self {
        Self {
            critical: INDICATOR_CRITICAL_CUT,
            high: INDICATOR_HIGH_CUT,
            medium: INDICATOR_MEDIUM_CUT,
        }
    }

    pub fn comprehensive_default() -> Self {
        Self {
            critical: COMPREHENSIVE_CRITICAL_CUT,
            high: COMPREHENSIVE_HIGH_CUT,
            medium: COMPREHENSIVE_MEDIUM_CUT,
        }
    }

    /// Bucket a score. Cut-points are inclusive lower bounds.
    pub fn level(&self, score: f64) -> ThreatLevel {
        if score >= self.critical {
            ThreatLevel::Critical
        } else if score >= self.high {
            ThreatLevel::High
        } else if score >= self.medium {
            ThreatLevel::Medium
        } else {
            ThreatLevel::Low
        }
    }

    fn validate(&self, name: &str) -> Result<(), ThreatError> {
        let c = [self.critical, self.high, self.medium];
        let ordered = c.iter().all(|x| x.is_finite() && (-1.0..=1.0).contains(x))
            && c[0] > c[1]
            && c[1] > c[2];
        if !ordered {
            return Err(ThreatError::InvalidConfig(format!(
                "{name} cut-points must lie in [-1, 1] with critical > high > medium, got {c:?}"
            )));
        }
        Ok(())
    }
}

fn default_indicator_levels() -> LevelCuts {
    LevelCuts::indicator_default()
}

fn default_comprehensive_levels() -> LevelCuts {
    LevelCuts::comprehensive_default()
}

fn default_complexity_radius() -> f64 {
    COMPLEXITY_RADIUS
}

/// Complete evaluator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    #[serde(default)]
    pub weights: WeightVector,
    #[serde(default)]
    pub distance_bands: DistanceBands,
    #[serde(default)]
    pub angle_bands: AngleBands,
    #[serde(default = "default_indicator_levels")]
    pub indicator_levels: LevelCuts,
    #[serde(default = "default_comprehensive_levels")]
    pub comprehensive_levels: LevelCuts,
    #[serde(default)]
    pub environment_policy: EnvironmentPolicy,
    /// Radius (m) of the neighbourhood sampled for environment complexity.
    #[serde(default = "default_complexity_radius")]
    pub complexity_radius: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            weights: WeightVector::default(),
            distance_bands: DistanceBands::default(),
            angle_bands: AngleBands::default(),
            indicator_levels: default_indicator_levels(),
            comprehensive_levels: default_comprehensive_levels(),
            environment_policy: EnvironmentPolicy::default(),
            complexity_radius: COMPLEXITY_RADIUS,
        }
    }
}

impl EvaluatorConfig {
    pub fn with_weights(mut self, weights: WeightVector) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_environment_policy(mut self, policy: EnvironmentPolicy) -> Self {
        self.environment_policy = policy;
        self
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ThreatError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ThreatError::InvalidConfig(format!("malformed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self, ThreatError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ThreatError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ThreatError> {
        self.weights.validate()?;
        self.distance_bands.validate()?;
        self.angle_bands.validate()?;
        self.indicator_levels.validate("indicator_levels")?;
        self.comprehensive_levels.validate("comprehensive_levels")?;
        if !(self.complexity_radius > 0.0 && self.complexity_radius <= MAX_COMPLEXITY_RADIUS) {
            return Err(ThreatError::InvalidConfig(format!(
                "complexity_radius must be in (0, {MAX_COMPLEXITY_RADIUS}], got {}",
                self.complexity_radius
            )));
        }
        Ok(())
    }
}
