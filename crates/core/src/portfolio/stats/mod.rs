//! Portfolio-level aggregation - the single reporting structure dashboards
//! consume.

pub mod stats_calculator;
pub mod stats_model;

pub use stats_calculator::*;
pub use stats_model::*;

#[cfg(test)]
mod stats_calculator_tests;
