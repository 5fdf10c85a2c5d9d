//! FIFO lot ledger - turns a ticker's trade history into open lots and
//! realized gains.

pub mod ledger_calculator;
pub mod lots_model;

pub use ledger_calculator::*;
pub use lots_model::*;
