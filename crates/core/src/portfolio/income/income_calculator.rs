use chrono::Datelike;
use log::debug;
use rust_decimal::Decimal;

use crate::portfolio::income::DividendSummary;
use crate::portfolio::ledger::TickerLedger;
use crate::transactions::{Transaction, TransactionKind};

/// Aggregates DIVIDEND transactions into a portfolio income summary.
///
/// For a dividend, `price` is the per-share amount (so gross is
/// `quantity * price`) and `tax` is the withholding deducted at source.
pub fn aggregate_dividends(transactions: &[&Transaction]) -> DividendSummary {
    let mut summary = DividendSummary::default();
    for tx in transactions {
        if tx.kind != TransactionKind::Dividend {
            continue;
        }
        summary.add(&tx.ticker, tx.date.year(), tx.amount(), tx.tax);
    }
    debug!(
        "Aggregated dividends: gross {}, withholding {}, net {}",
        summary.gross, summary.withholding_tax, summary.net
    );
    summary
}

/// Lifetime realized gain across every ticker's ledger run.
pub fn sum_realized_gains(ledgers: &[TickerLedger]) -> Decimal {
    ledgers.iter().map(|ledger| ledger.realized_gain()).sum()
}

/// Capital-gains tax levied at filing time (TAX_ADJUSTMENT transactions).
///
/// Kept apart from per-trade commission/sales-tax/depository charges; it is
/// reported independently in the fee breakdown.
pub fn sum_capital_gains_tax(transactions: &[&Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::TaxAdjustment)
        .map(|tx| tx.amount())
        .sum()
}
