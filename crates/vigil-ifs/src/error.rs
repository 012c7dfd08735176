use thiserror::Error;

/// Failures raised by the fuzzy algebra.
///
/// All of these indicate a programming or configuration defect; none is
/// recoverable by retrying the same call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    #[error("invalid fuzzy value: mu={mu}, nu={nu} (need mu, nu in [0, 1] and mu + nu <= 1)")]
    InvalidFuzzyValue { mu: f64, nu: f64 },

    #[error("no fuzzy values to aggregate")]
    EmptyInput,

    #[error("length mismatch: {values} values, {weights} weights")]
    LengthMismatch { values: usize, weights: usize },

    #[error("invalid aggregation weight: {weight}")]
    InvalidWeight { weight: f64 },

    #[error("aggregation weights sum to {sum}, expected 1.0")]
    WeightSum { sum: f64 },

    #[error("invalid conversion parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("unknown linguistic term: {0:?}")]
    UnknownTerm(String),

    #[error("membership curve needs at least one anchor with strictly increasing x")]
    InvalidCurve,
}
