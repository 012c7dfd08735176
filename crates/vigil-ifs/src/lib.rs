//! Intuitionistic fuzzy set algebra for VIGIL.
//!
//! Defines the fuzzy value triple (membership, non-membership, hesitancy),
//! its ranking functions and distances, the IFWA aggregation operator, and
//! converters from raw scalars, intervals, triangular numbers and linguistic
//! terms. Pure math with no I/O.

pub mod aggregate;
pub mod convert;
pub mod curve;
pub mod error;
pub mod value;

pub use aggregate::weighted_average;
pub use convert::{
    from_interval, from_linguistic, from_real, from_triangular, LinguisticTerm,
};
pub use curve::{Anchor, MembershipCurve};
pub use error::FuzzyError;
pub use value::FuzzyValue;

/// Slack accepted when checking `mu + nu <= 1` on construction.
pub const FUZZY_EPSILON: f64 = 1e-9;

/// Score/accuracy difference below which two values compare equal.
pub const COMPARE_EPSILON: f64 = 1e-6;

/// Allowed deviation of an aggregation weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;
