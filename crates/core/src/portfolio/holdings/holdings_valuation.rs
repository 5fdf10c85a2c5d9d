use log::warn;
use rust_decimal::Decimal;

use crate::portfolio::holdings::Holding;
use crate::portfolio::ledger::{is_quantity_significant, TickerLedger};

/// Values a ticker's surviving lots at the supplied quote.
///
/// Returns `None` when nothing is open. With no quote the valuation falls
/// back to the ledger's last trade price and the holding is flagged stale
/// rather than the computation failing.
pub fn value_holding(ledger: &TickerLedger, quote: Option<Decimal>) -> Option<Holding> {
    let quantity = ledger.open_quantity();
    if !quantity.is_sign_positive() || !is_quantity_significant(&quantity) {
        return None;
    }

    let (current_price, price_stale) = match quote {
        Some(price) => (price, false),
        None => {
            let fallback = ledger.last_trade_price.unwrap_or(Decimal::ZERO);
            warn!(
                "No quote for {}; valuing {} shares at last trade price {}",
                ledger.ticker, quantity, fallback
            );
            (fallback, true)
        }
    };

    let total_cost_basis = ledger.total_cost_basis();
    let market_value = quantity * current_price;

    Some(Holding {
        ticker: ledger.ticker.clone(),
        quantity,
        average_cost: ledger.average_cost(),
        total_cost_basis,
        current_price,
        market_value,
        unrealized_gain: market_value - total_cost_basis,
        price_stale,
        weight: Decimal::ZERO,
    })
}
