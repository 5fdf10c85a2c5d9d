//! Core error types for the portfolio accounting engine.
//!
//! The engine is a pure function of its inputs, so every error here describes
//! bad input: a misconfigured fee schedule, an unparsable transaction record,
//! or a calculation that was asked to do something impossible. Recoverable
//! anomalies (over-sells, missing prices) are surfaced as warnings on the
//! calculation results instead, see `portfolio::ledger::LedgerWarning`.

use chrono::ParseError as ChronoParseError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Broker fee schedule invalid: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Portfolio calculation failed: {0}")]
    Calculation(#[from] CalculatorError),
}

/// A broker fee schedule that cannot be evaluated.
///
/// A *configured* field is never silently defaulted: a negative rate or a
/// rate the declared kind requires but does not carry fails the evaluation.
/// Absent optional fields (e.g. `salesTaxRate`) legitimately default to zero.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("'{field}' is negative ({value}); rates must be non-negative")]
    NegativeRate { field: &'static str, value: Decimal },

    #[error("kind {kind} requires '{field}' but the schedule does not set it")]
    MissingRate {
        kind: &'static str,
        field: &'static str,
    },
}

/// Errors that occur during portfolio calculations.
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Invalid transaction data: {0}")]
    InvalidTransaction(String),

    #[error("Unsupported transaction kind: {0}")]
    UnsupportedTransactionKind(String),

    #[error("Calculation failed: {0}")]
    Calculation(String),
}

/// Validation errors for a single transaction record.
///
/// Every variant names the offending transaction so one bad record can be
/// skipped without corrupting the rest of the log.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Transaction {id}: cannot parse {field} '{value}' as a decimal number")]
    DecimalField {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("Transaction {id}: cannot parse date '{value}': {source}")]
    DateField {
        id: String,
        value: String,
        source: ChronoParseError,
    },

    #[error("Transaction {id}: unknown transaction kind '{value}'")]
    UnknownKind { id: String, value: String },

    #[error("Transaction {id}: {field} must not be negative (got {value})")]
    NegativeValue {
        id: String,
        field: &'static str,
        value: Decimal,
    },

    #[error("Transaction {id}: required field '{field}' is missing")]
    MissingField { id: String, field: &'static str },
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
