//! Conversions from raw data to fuzzy values.
//!
//! Every converter derives ν as a bounded complement of μ, so
//! `mu + nu <= 1` holds by construction rather than by clamping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FuzzyError;
use crate::value::FuzzyValue;

/// Real number → fuzzy value via a Gaussian membership around `ideal`.
///
/// μ = exp(−(value − ideal)² / 2·tolerance²), ν = (1 − μ)(1 − hesitancy).
/// `hesitancy` is the share of the non-member mass left undecided.
pub fn from_real(value: f64, ideal: f64, tolerance: f64, hesitancy: f64) -> Result<FuzzyValue, FuzzyError> {
    if !value.is_finite() {
        return Err(FuzzyError::InvalidParameter { name: "value", value });
    }
    if !ideal.is_finite() {
        return Err(FuzzyError::InvalidParameter { name: "ideal", value: ideal });
    }
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(FuzzyError::InvalidParameter { name: "tolerance", value: tolerance });
    }
    if !(0.0..=1.0).contains(&hesitancy) {
        return Err(FuzzyError::InvalidParameter { name: "hesitancy", value: hesitancy });
    }

    let d = value - ideal;
    let mu = (-(d * d) / (2.0 * tolerance * tolerance)).exp();
    FuzzyValue::new(mu, (1.0 - mu) * (1.0 - hesitancy))
}

/// Interval `[lower, upper]` → fuzzy value.
///
/// The midpoint's distance from `ideal` (relative to the reference span)
/// drives μ; the half-width drives hesitancy, capped at 0.5.
pub fn from_interval(
    lower: f64,
    upper: f64,
    ideal: f64,
    reference: (f64, f64),
) -> Result<FuzzyValue, FuzzyError> {
    if !(lower.is_finite() && upper.is_finite()) || lower > upper {
        return Err(FuzzyError::InvalidParameter { name: "interval", value: upper - lower });
    }
    let span = reference_span(reference)?;

    let midpoint = (lower + upper) / 2.0;
    let radius = (upper - lower) / 2.0;
    let deviation = (midpoint - ideal).abs() / span;

    let mu = (-2.0 * deviation).exp();
    let pi = (radius / span).min(0.5);
    FuzzyValue::new(mu, (1.0 - mu) * (1.0 - pi))
}

/// Triangular fuzzy number `(a, b, c)` → fuzzy value.
///
/// μ peaks when the core `b` sits mid-reference and falls linearly toward
/// either end; the support width `c − a` drives hesitancy, capped at 0.4.
pub fn from_triangular(a: f64, b: f64, c: f64, reference: (f64, f64)) -> Result<FuzzyValue, FuzzyError> {
    if !(a.is_finite() && b.is_finite() && c.is_finite()) || a > b || b > c {
        return Err(FuzzyError::InvalidParameter { name: "triangle", value: b });
    }
    let span = reference_span(reference)?;

    let relative = ((b - reference.0) / span).clamp(0.0, 1.0);
    let mu = 1.0 - (relative - 0.5).abs() * 2.0;
    let pi = ((c - a) / span).min(0.4);
    FuzzyValue::new(mu, (1.0 - mu) * (1.0 - pi))
}

/// Linguistic term → fuzzy value. Unknown terms are an error.
pub fn from_linguistic(term: &str) -> Result<FuzzyValue, FuzzyError> {
    term.parse::<LinguisticTerm>().map(LinguisticTerm::value)
}

fn reference_span((min, max): (f64, f64)) -> Result<f64, FuzzyError> {
    let span = max - min;
    if !(span.is_finite() && span > 0.0) {
        return Err(FuzzyError::InvalidParameter { name: "reference_span", value: span });
    }
    Ok(span)
}

/// Fixed vocabulary of evaluation terms with their fuzzy values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinguisticTerm {
    Critical,
    VeryHigh,
    HighThreat,
    High,
    MediumHigh,
    Moderate,
    Medium,
    MediumLow,
    LowThreat,
    Low,
    VeryLow,
    Minimal,
}

impl LinguisticTerm {
    pub const ALL: [LinguisticTerm; 12] = [
        LinguisticTerm::Critical,
        LinguisticTerm::VeryHigh,
        LinguisticTerm::HighThreat,
        LinguisticTerm::High,
        LinguisticTerm::MediumHigh,
        LinguisticTerm::Moderate,
        LinguisticTerm::Medium,
        LinguisticTerm::MediumLow,
        LinguisticTerm::LowThreat,
        LinguisticTerm::Low,
        LinguisticTerm::VeryLow,
        LinguisticTerm::Minimal,
    ];

    /// The fuzzy value this term stands for.
    pub const fn value(self) -> FuzzyValue {
        let (mu, nu) = match self {
            LinguisticTerm::Critical => (0.95, 0.02),
            LinguisticTerm::VeryHigh => (0.90, 0.05),
            LinguisticTerm::HighThreat => (0.80, 0.12),
            LinguisticTerm::High => (0.75, 0.15),
            LinguisticTerm::MediumHigh => (0.65, 0.25),
            LinguisticTerm::Moderate => (0.55, 0.35),
            LinguisticTerm::Medium => (0.50, 0.40),
            LinguisticTerm::MediumLow => (0.35, 0.55),
            LinguisticTerm::LowThreat => (0.30, 0.60),
            LinguisticTerm::Low => (0.25, 0.65),
            LinguisticTerm::VeryLow => (0.10, 0.80),
            LinguisticTerm::Minimal => (0.10, 0.85),
        };
        FuzzyValue { mu, nu }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinguisticTerm::Critical => "critical",
            LinguisticTerm::VeryHigh => "very_high",
            LinguisticTerm::HighThreat => "high_threat",
            LinguisticTerm::High => "high",
            LinguisticTerm::MediumHigh => "medium_high",
            LinguisticTerm::Moderate => "moderate",
            LinguisticTerm::Medium => "medium",
            LinguisticTerm::MediumLow => "medium_low",
            LinguisticTerm::LowThreat => "low_threat",
            LinguisticTerm::Low => "low",
            LinguisticTerm::VeryLow => "very_low",
            LinguisticTerm::Minimal => "minimal",
        }
    }
}

impl FromStr for LinguisticTerm {
    type Err = FuzzyError;

    /// Case-insensitive; spaces and hyphens are read as underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        LinguisticTerm::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| FuzzyError::UnknownTerm(s.to_string()))
    }
}

impl fmt::Display for LinguisticTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_real_peak_and_decay() {
        let at_ideal = from_real(0.0, 0.0, 15.0, 0.1).unwrap();
        assert_eq!(at_ideal.mu(), 1.0);
        assert_eq!(at_ideal.nu(), 0.0);

        let far = from_real(30.0, 0.0, 15.0, 0.1).unwrap();
        // exp(-2) ≈ 0.135
        assert!((far.mu() - (-2.0_f64).exp()).abs() < 1e-12);
        assert!((far.hesitancy() - (1.0 - far.mu()) * 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_from_real_rejects_bad_tolerance() {
        assert!(from_real(1.0, 0.0, 0.0, 0.1).is_err());
        assert!(from_real(1.0, 0.0, 5.0, 1.5).is_err());
        assert!(from_real(f64::NAN, 0.0, 5.0, 0.1).is_err());
    }

    #[test]
    fn test_from_interval_width_raises_hesitancy() {
        let narrow = from_interval(9.0, 11.0, 0.0, (0.0, 50.0)).unwrap();
        let wide = from_interval(0.0, 20.0, 0.0, (0.0, 50.0)).unwrap();
        assert_eq!(narrow.mu(), wide.mu(), "same midpoint, same membership");
        assert!(wide.hesitancy() > narrow.hesitancy());
        assert!(from_interval(5.0, 1.0, 0.0, (0.0, 10.0)).is_err());
    }

    #[test]
    fn test_from_triangular() {
        let centred = from_triangular(20.0, 25.0, 30.0, (0.0, 50.0)).unwrap();
        assert!((centred.mu() - 1.0).abs() < 1e-12);

        let edge = from_triangular(0.0, 0.0, 5.0, (0.0, 50.0)).unwrap();
        assert!(edge.mu().abs() < 1e-12);
        assert!((edge.hesitancy() - 0.1).abs() < 1e-12);

        assert!(from_triangular(3.0, 2.0, 5.0, (0.0, 10.0)).is_err());
        assert!(from_triangular(1.0, 2.0, 3.0, (5.0, 5.0)).is_err());
    }

    #[test]
    fn test_linguistic_terms() {
        assert_eq!(from_linguistic("Very High").unwrap(), LinguisticTerm::VeryHigh.value());
        assert_eq!(from_linguistic("medium-low").unwrap(), LinguisticTerm::MediumLow.value());
        assert!(matches!(from_linguistic("enormous"), Err(FuzzyError::UnknownTerm(_))));

        for term in LinguisticTerm::ALL {
            let v = term.value();
            assert!(v.mu() + v.nu() <= 1.0, "{term} violates mu + nu <= 1");
            assert_eq!(term.as_str().parse::<LinguisticTerm>().unwrap(), term);
        }
    }

    #[test]
    fn test_linguistic_ordering_by_score() {
        assert!(LinguisticTerm::Critical.value().score() > LinguisticTerm::High.value().score());
        assert!(LinguisticTerm::High.value().score() > LinguisticTerm::Medium.value().score());
        assert!(LinguisticTerm::Medium.value().score() > LinguisticTerm::VeryLow.value().score());
    }
}
