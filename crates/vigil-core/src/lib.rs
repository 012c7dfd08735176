//! Core vocabulary for the VIGIL threat evaluation engine.
//!
//! This crate defines the types shared across all other crates:
//! positions, unit classes, threat levels, target snapshots, evaluator
//! configuration, constants, and the engine error type.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod target;
pub mod types;

pub use vigil_ifs as ifs;

#[cfg(test)]
mod tests;
