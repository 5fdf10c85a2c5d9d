use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A ticker's open position valued at a market price.
///
/// A projection with no lifecycle of its own: recomputed from the surviving
/// lots and the price map on every call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub quantity: Decimal,
    /// Average acquisition cost per share, charges included.
    pub average_cost: Decimal,
    pub total_cost_basis: Decimal,
    pub current_price: Decimal,
    pub market_value: Decimal,
    pub unrealized_gain: Decimal,
    /// Set when no quote was supplied for the ticker and the valuation fell
    /// back to the last trade price. Presentation layers warn on it; the
    /// numbers are still computed.
    pub price_stale: bool,
    /// Percent of total holdings market value; filled in by the portfolio
    /// aggregator.
    #[serde(default)]
    pub weight: Decimal,
}
