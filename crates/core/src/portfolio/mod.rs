//! Portfolio accounting - lot ledger, valuation, income, performance, stats.

pub mod holdings;
pub mod income;
pub mod ledger;
pub mod performance;
pub mod stats;

pub use holdings::*;
pub use income::*;
pub use ledger::*;
pub use performance::*;
pub use stats::*;
