//! Money-weighted return solving and simple return arithmetic.

pub mod performance_model;
pub mod returns_calculator;

pub use performance_model::*;
pub use returns_calculator::*;

#[cfg(test)]
mod returns_calculator_tests;
