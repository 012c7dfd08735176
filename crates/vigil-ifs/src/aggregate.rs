//! IFWA: intuitionistic fuzzy weighted averaging.

use crate::error::FuzzyError;
use crate::value::FuzzyValue;
use crate::WEIGHT_SUM_TOLERANCE;

/// Aggregate fuzzy values with the IFWA operator:
///
/// μ = 1 − Π(1 − μᵢ)^wᵢ, ν = Π νᵢ^wᵢ
///
/// Weights must be finite, non-negative and sum to 1 within
/// [`WEIGHT_SUM_TOLERANCE`]. The result is closed: μ + ν ≤ 1 because
/// νᵢ ≤ 1 − μᵢ term by term.
pub fn weighted_average(values: &[FuzzyValue], weights: &[f64]) -> Result<FuzzyValue, FuzzyError> {
    if values.is_empty() {
        return Err(FuzzyError::EmptyInput);
    }
    if values.len() != weights.len() {
        return Err(FuzzyError::LengthMismatch {
            values: values.len(),
            weights: weights.len(),
        });
    }

    let mut sum = 0.0;
    for &w in weights {
        if !w.is_finite() || w < 0.0 {
            return Err(FuzzyError::InvalidWeight { weight: w });
        }
        sum += w;
    }
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(FuzzyError::WeightSum { sum });
    }

    // One active weight is 1 within tolerance; return that value as is.
    let mut active = weights.iter().enumerate().filter(|(_, &w)| w > 0.0).map(|(i, _)| i);
    if let (Some(i), None) = (active.next(), active.next()) {
        return Ok(values[i]);
    }

    let mut keep = 1.0_f64;
    let mut against = 1.0_f64;
    for (v, &w) in values.iter().zip(weights) {
        // 0^0 would contribute 1 anyway; skipping keeps zero weights exact.
        if w == 0.0 {
            continue;
        }
        keep *= (1.0 - v.mu).powf(w);
        against *= v.nu.powf(w);
    }

    FuzzyValue::new(1.0 - keep, against)
}
