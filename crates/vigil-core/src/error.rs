use thiserror::Error;
use vigil_ifs::FuzzyError;

/// Engine-level failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThreatError {
    #[error(transparent)]
    InvalidFuzzyValue(#[from] FuzzyError),

    #[error("target {target_id}: missing or non-finite {attribute}")]
    MissingAttribute {
        target_id: u32,
        attribute: &'static str,
    },

    #[error("invalid weight vector: {0}")]
    InvalidWeights(String),

    #[error("invalid evaluator config: {0}")]
    InvalidConfig(String),
}

impl ThreatError {
    /// Whether another estimation strategy may still succeed on the same input.
    /// Missing data is recoverable; configuration defects are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ThreatError::MissingAttribute { .. })
    }
}
