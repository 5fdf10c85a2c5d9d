//! Broker fee schedules and the per-trade charge evaluator.

pub mod brokers_model;
pub mod fees_calculator;

pub use brokers_model::*;
pub use fees_calculator::*;
