//! Transaction model - the immutable event log the whole engine derives from.

pub mod transactions_model;

pub use transactions_model::*;
