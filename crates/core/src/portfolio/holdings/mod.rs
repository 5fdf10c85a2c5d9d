//! Holding snapshots - open lots combined with a market price.

pub mod holdings_model;
pub mod holdings_valuation;

pub use holdings_model::*;
pub use holdings_valuation::*;

#[cfg(test)]
mod holdings_valuation_tests;
