use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dated external cash flow.
///
/// Negative amounts are capital contributed (deposits); positive amounts are
/// capital returned (withdrawals, and the terminal valuation flow).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl CashFlow {
    /// Capital put into the portfolio; stored negative.
    pub fn contribution(amount: Decimal, date: NaiveDate) -> Self {
        CashFlow {
            amount: -amount,
            date,
        }
    }

    /// Capital taken out of the portfolio; stored positive.
    pub fn distribution(amount: Decimal, date: NaiveDate) -> Self {
        CashFlow { amount, date }
    }
}
