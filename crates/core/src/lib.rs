//! Lotbook Core - portfolio accounting and valuation engine.
//!
//! Turns a chronological transaction log, a set of broker fee schedules,
//! and a price map into open positions, cost bases, realized gains, and
//! portfolio performance figures. Every calculation is a pure function of
//! its inputs: no I/O, no caching, no ambient state. Persistence and
//! presentation belong to the callers.

pub mod brokers;
pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod transactions;

// Re-export common types from the domain modules
pub use brokers::*;
pub use portfolio::*;
pub use transactions::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
