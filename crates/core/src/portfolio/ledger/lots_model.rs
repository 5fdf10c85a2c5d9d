use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::constants::QUANTITY_THRESHOLD;

/// Whether a quantity is large enough to count as an open position.
pub fn is_quantity_significant(quantity: &Decimal) -> bool {
    let threshold =
        Decimal::from_str_radix(QUANTITY_THRESHOLD, 10).unwrap_or_else(|_| Decimal::new(1, 8));
    quantity.abs() >= threshold
}

/// A purchased block of shares, consumed oldest-first on sale.
///
/// `cost_per_share` already embeds the acquisition charges:
/// `(quantity * price + charges) / quantity` at purchase time. Lots exist
/// only inside one ledger run; they are never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    pub acquired_at: NaiveDate,
    pub quantity: Decimal,
    pub cost_per_share: Decimal,
}

impl Lot {
    pub fn cost_basis(&self) -> Decimal {
        self.quantity * self.cost_per_share
    }
}

/// The outcome of matching one SELL against the lot queue. Created once per
/// SELL transaction, never mutated afterward.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RealizedGainRecord {
    pub ticker: String,
    pub date: NaiveDate,
    pub quantity_sold: Decimal,
    /// Acquisition cost (charges included) of the matched shares.
    pub cost_basis: Decimal,
    /// Sale value after charges: `price * quantity - charges`.
    pub net_proceeds: Decimal,
    pub gain: Decimal,
}

/// A non-fatal anomaly found while processing a ticker's transactions.
///
/// Warnings let callers see which records could not be processed cleanly
/// without the whole calculation stopping.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerWarning {
    pub transaction_id: String,
    pub ticker: String,
    pub date: NaiveDate,
    pub message: String,
}

impl fmt::Display for LedgerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {}] {}",
            self.date, self.ticker, self.transaction_id, self.message
        )
    }
}

/// Which open lots a SELL consumes first.
///
/// The selection order is the only thing that changes between the policies;
/// the matching state machine is the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LotSelection {
    /// Oldest standing lots first.
    #[default]
    FirstInFirstOut,
    /// Lots bought the same day as the sale first, then oldest-first. Used
    /// by what-if simulation callers; the historical ledger stays FIFO.
    IntradayFirst,
}

/// Per-trade charge totals accumulated over a ticker's ledger run, kept by
/// category so the portfolio fee breakdown can report them independently.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerFees {
    pub commission: Decimal,
    pub sales_tax: Decimal,
    pub depository_charge: Decimal,
    pub other_fees: Decimal,
}

/// End state of one ticker's ledger run: the surviving lot queue, the
/// realized-gain history, and everything the downstream aggregators need.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TickerLedger {
    pub ticker: String,
    pub lots: VecDeque<Lot>,
    pub realized_gains: Vec<RealizedGainRecord>,
    pub warnings: Vec<LedgerWarning>,
    pub fees: LedgerFees,
    /// Gross cash spent on purchases, charges included.
    pub total_buy_cost: Decimal,
    /// Price of the most recent trade, the valuation fallback when no quote
    /// is supplied for the ticker.
    pub last_trade_price: Option<Decimal>,
    pub last_traded_at: Option<NaiveDate>,
}

impl TickerLedger {
    pub fn new(ticker: impl Into<String>) -> Self {
        TickerLedger {
            ticker: ticker.into(),
            lots: VecDeque::new(),
            realized_gains: Vec::new(),
            warnings: Vec::new(),
            fees: LedgerFees::default(),
            total_buy_cost: Decimal::ZERO,
            last_trade_price: None,
            last_traded_at: None,
        }
    }

    pub fn open_quantity(&self) -> Decimal {
        self.lots.iter().map(|lot| lot.quantity).sum()
    }

    pub fn total_cost_basis(&self) -> Decimal {
        self.lots.iter().map(|lot| lot.cost_basis()).sum()
    }

    /// Average acquisition cost of the open quantity; zero when nothing is
    /// open.
    pub fn average_cost(&self) -> Decimal {
        let quantity = self.open_quantity();
        if quantity.is_sign_positive() && is_quantity_significant(&quantity) {
            self.total_cost_basis() / quantity
        } else {
            Decimal::ZERO
        }
    }

    pub fn realized_gain(&self) -> Decimal {
        self.realized_gains.iter().map(|record| record.gain).sum()
    }

    /// Cash received from sales, charges already deducted.
    pub fn total_sell_proceeds(&self) -> Decimal {
        self.realized_gains
            .iter()
            .map(|record| record.net_proceeds)
            .sum()
    }
}
