//! The intuitionistic fuzzy number and its scalar functions.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FuzzyError;
use crate::{COMPARE_EPSILON, FUZZY_EPSILON};

/// Intuitionistic fuzzy number (μ, ν) with implied hesitancy π = 1 − μ − ν.
///
/// Always satisfies `0 <= mu`, `0 <= nu`, `mu + nu <= 1`. Values are
/// immutable; every operator returns a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFuzzyValue", into = "RawFuzzyValue")]
pub struct FuzzyValue {
    pub(crate) mu: f64,
    pub(crate) nu: f64,
}

/// Wire form of a fuzzy value. Re-validated on deserialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawFuzzyValue {
    mu: f64,
    nu: f64,
}

impl TryFrom<RawFuzzyValue> for FuzzyValue {
    type Error = FuzzyError;

    fn try_from(raw: RawFuzzyValue) -> Result<Self, Self::Error> {
        FuzzyValue::new(raw.mu, raw.nu)
    }
}

impl From<FuzzyValue> for RawFuzzyValue {
    fn from(v: FuzzyValue) -> Self {
        RawFuzzyValue { mu: v.mu, nu: v.nu }
    }
}

impl FuzzyValue {
    /// Certain membership: (1, 0).
    pub const FULL: FuzzyValue = FuzzyValue { mu: 1.0, nu: 0.0 };
    /// Certain non-membership: (0, 1).
    pub const EMPTY: FuzzyValue = FuzzyValue { mu: 0.0, nu: 1.0 };
    /// Total ignorance: (0, 0), hesitancy 1.
    pub const UNKNOWN: FuzzyValue = FuzzyValue { mu: 0.0, nu: 0.0 };

    /// Build a validated fuzzy value.
    ///
    /// Rejects non-finite components, components outside `[0, 1]`, and
    /// `mu + nu > 1`. Overshoots within [`FUZZY_EPSILON`] are floating-point
    /// noise and are rounded onto the boundary.
    pub fn new(mu: f64, nu: f64) -> Result<Self, FuzzyError> {
        let in_range = |x: f64| x.is_finite() && x >= -FUZZY_EPSILON && x <= 1.0 + FUZZY_EPSILON;
        if !in_range(mu) || !in_range(nu) || mu + nu > 1.0 + FUZZY_EPSILON {
            return Err(FuzzyError::InvalidFuzzyValue { mu, nu });
        }
        Ok(Self::rounded(mu, nu))
    }

    /// Explicit opt-in clamping constructor.
    ///
    /// Components are clamped to `[0, 1]` (NaN becomes 0), and a pair whose
    /// sum exceeds 1 is rescaled proportionally onto `mu + nu = 1`.
    pub fn clamped(mu: f64, nu: f64) -> Self {
        let clamp = |x: f64| if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
        let (mu, nu) = (clamp(mu), clamp(nu));
        let total = mu + nu;
        if total > 1.0 {
            Self::rounded(mu / total, nu / total)
        } else {
            Self { mu, nu }
        }
    }

    /// Snap a mathematically valid pair onto the valid region.
    /// Only for values that are valid up to rounding.
    pub(crate) fn rounded(mu: f64, nu: f64) -> Self {
        let mu = mu.clamp(0.0, 1.0);
        let nu = nu.clamp(0.0, 1.0);
        if mu + nu > 1.0 {
            Self { mu, nu: 1.0 - mu }
        } else {
            Self { mu, nu }
        }
    }

    /// Membership degree μ.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Non-membership degree ν.
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// Hesitancy degree π = 1 − μ − ν.
    pub fn hesitancy(&self) -> f64 {
        (1.0 - self.mu - self.nu).max(0.0)
    }

    /// Score function S = μ − ν, in `[-1, 1]`. Higher means more threatening.
    pub fn score(&self) -> f64 {
        self.mu - self.nu
    }

    /// Accuracy function H = μ + ν, in `[0, 1]`. Higher means more certain.
    pub fn accuracy(&self) -> f64 {
        self.mu + self.nu
    }

    /// Normalized Hamming distance over (μ, ν, π), in `[0, 1]`.
    pub fn hamming_distance(&self, other: &FuzzyValue) -> f64 {
        ((self.mu - other.mu).abs()
            + (self.nu - other.nu).abs()
            + (self.hesitancy() - other.hesitancy()).abs())
            / 2.0
    }

    /// Normalized Euclidean distance over (μ, ν, π), in `[0, 1]`.
    pub fn euclidean_distance(&self, other: &FuzzyValue) -> f64 {
        let dm = self.mu - other.mu;
        let dn = self.nu - other.nu;
        let dp = self.hesitancy() - other.hesitancy();
        ((dm * dm + dn * dn + dp * dp) / 2.0).sqrt()
    }

    /// Ranking comparison: score first, then accuracy, each with a
    /// [`COMPARE_EPSILON`] dead band. Equal when both are within the band.
    pub fn compare(&self, other: &FuzzyValue) -> Ordering {
        let ds = self.score() - other.score();
        if ds.abs() > COMPARE_EPSILON {
            return if ds > 0.0 { Ordering::Greater } else { Ordering::Less };
        }
        let da = self.accuracy() - other.accuracy();
        if da.abs() > COMPARE_EPSILON {
            return if da > 0.0 { Ordering::Greater } else { Ordering::Less };
        }
        Ordering::Equal
    }

    /// Complement (ν, μ).
    pub fn complement(&self) -> FuzzyValue {
        FuzzyValue { mu: self.nu, nu: self.mu }
    }

    /// Union: (max μ, min ν).
    pub fn union(&self, other: &FuzzyValue) -> FuzzyValue {
        FuzzyValue::rounded(self.mu.max(other.mu), self.nu.min(other.nu))
    }

    /// Intersection: (min μ, max ν).
    pub fn intersection(&self, other: &FuzzyValue) -> FuzzyValue {
        FuzzyValue::rounded(self.mu.min(other.mu), self.nu.max(other.nu))
    }
}

impl fmt::Display for FuzzyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IFS(μ={:.3}, ν={:.3}, π={:.3})",
            self.mu,
            self.nu,
            self.hesitancy()
        )
    }
}
