use log::debug;
use rust_decimal::Decimal;

use crate::brokers::{BrokerFeeSchedule, CommissionKind, DepositoryKind, TradeCharges};
use crate::errors::Result;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Evaluates a broker's fee schedule against one trade.
///
/// Returns the itemized charges for a trade of `quantity` shares at `price`
/// per share. A zero-quantity trade carries no charges. The schedule is
/// validated first; a negative or missing required rate fails with
/// `ConfigurationError` rather than being clamped to zero.
pub fn calculate_trade_charges(
    price: Decimal,
    quantity: Decimal,
    schedule: &BrokerFeeSchedule,
) -> Result<TradeCharges> {
    schedule.validate()?;

    if quantity.is_zero() {
        return Ok(TradeCharges::default());
    }

    let gross = price * quantity;
    let rate1 = schedule.rate1.unwrap_or(Decimal::ZERO);
    let rate2 = schedule.rate2.unwrap_or(Decimal::ZERO);

    let commission = match schedule.commission_kind {
        CommissionKind::Percentage => gross * rate1 / HUNDRED,
        CommissionKind::PerShare => quantity * rate1,
        CommissionKind::Fixed => rate1,
        // No tier table is configured anywhere; evaluates as the flat
        // percentage on rate1.
        CommissionKind::Slab => gross * rate1 / HUNDRED,
        CommissionKind::HigherOf => {
            let per_share = quantity * rate2;
            let percentage = gross * rate1 / HUNDRED;
            per_share.max(percentage)
        }
    };

    // Sales tax applies to the commission amount, never to trade value.
    let sales_tax = commission * schedule.sales_tax_pct() / HUNDRED;

    let depository_rate = schedule.depository_rate.unwrap_or(Decimal::ZERO);
    let depository_charge = match schedule.depository_kind {
        DepositoryKind::PerShare => quantity * depository_rate,
        DepositoryKind::Fixed => depository_rate,
        DepositoryKind::HigherOf => {
            let per_share = quantity * depository_rate;
            per_share.max(schedule.depository_min.unwrap_or(Decimal::ZERO))
        }
    };

    let charges = TradeCharges::new(commission, sales_tax, depository_charge);
    debug!(
        "Trade charges for {} x {}: commission {}, sales tax {}, depository {}",
        quantity, price, charges.commission, charges.sales_tax, charges.depository_charge
    );
    Ok(charges)
}
