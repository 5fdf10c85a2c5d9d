use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::brokers::{calculate_trade_charges, BrokerFeeSchedule, TradeCharges};
use crate::errors::Result;
use crate::portfolio::ledger::{
    is_quantity_significant, LedgerWarning, Lot, LotSelection, RealizedGainRecord, TickerLedger,
};
use crate::transactions::{Transaction, TransactionKind};

/// Groups the trade transactions (BUY/SELL) by ticker, preserving the input
/// order within each ticker. Cash-kind and dividend transactions never enter
/// a lot queue and are left to the income and stats aggregators.
pub fn trades_by_ticker<'a>(
    transactions: &[&'a Transaction],
) -> BTreeMap<String, Vec<&'a Transaction>> {
    let mut groups: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
    for &tx in transactions {
        if tx.kind.is_trade() {
            groups.entry(tx.ticker.clone()).or_default().push(tx);
        }
    }
    groups
}

/// Replays one ticker's trades into a lot queue.
///
/// Stateless between calls: every run rebuilds the queue from the
/// transaction stream it is given. Charges come from the transaction itself
/// when recorded there, otherwise from the broker schedule referenced by
/// `broker_ref`.
#[derive(Clone)]
pub struct LedgerCalculator<'a> {
    schedules: &'a HashMap<String, BrokerFeeSchedule>,
    selection: LotSelection,
}

impl<'a> LedgerCalculator<'a> {
    pub fn new(schedules: &'a HashMap<String, BrokerFeeSchedule>) -> Self {
        LedgerCalculator {
            schedules,
            selection: LotSelection::default(),
        }
    }

    pub fn with_selection(
        schedules: &'a HashMap<String, BrokerFeeSchedule>,
        selection: LotSelection,
    ) -> Self {
        LedgerCalculator {
            schedules,
            selection,
        }
    }

    /// Runs the ledger for one ticker.
    ///
    /// `transactions` is that ticker's slice of the log; it is re-sorted by
    /// date here (stable, so same-day trades keep their recorded order).
    /// Records that cannot be processed are skipped with a warning attached
    /// to the result; only a misconfigured fee schedule fails the run.
    pub fn calculate_ticker(
        &self,
        ticker: &str,
        transactions: &[&Transaction],
    ) -> Result<TickerLedger> {
        debug!(
            "Running lot ledger for {} over {} transactions",
            ticker,
            transactions.len()
        );

        let mut ordered: Vec<&Transaction> = transactions.to_vec();
        ordered.sort_by_key(|tx| tx.date);

        let mut ledger = TickerLedger::new(ticker);

        for tx in ordered {
            if !tx.kind.is_trade() {
                continue;
            }
            if let Err(e) = tx.validate() {
                let warning = LedgerWarning {
                    transaction_id: tx.id.clone(),
                    ticker: ledger.ticker.clone(),
                    date: tx.date,
                    message: format!("Skipped: {}", e),
                };
                warn!("{}", warning);
                ledger.warnings.push(warning);
                continue;
            }
            if tx.quantity.is_zero() {
                let warning = LedgerWarning {
                    transaction_id: tx.id.clone(),
                    ticker: ledger.ticker.clone(),
                    date: tx.date,
                    message: format!("Skipped: {} with zero quantity", tx.kind.as_str()),
                };
                warn!("{}", warning);
                ledger.warnings.push(warning);
                continue;
            }

            match tx.kind {
                TransactionKind::Buy => self.process_buy(tx, &mut ledger)?,
                TransactionKind::Sell => self.process_sell(tx, &mut ledger)?,
                _ => continue,
            }

            ledger.last_trade_price = Some(tx.price);
            ledger.last_traded_at = Some(tx.date);
        }

        Ok(ledger)
    }

    /// Charges for a trade: recorded values win, the broker schedule is the
    /// fallback for terse entries, and an unknown broker means no charges.
    /// Returns the itemized charges plus any recorded `other_fees` (which no
    /// schedule produces).
    fn resolve_charges(&self, tx: &Transaction) -> Result<(TradeCharges, Decimal)> {
        if tx.has_recorded_charges() {
            return Ok((
                TradeCharges::new(tx.commission, tx.tax, tx.depository_charge),
                tx.other_fees,
            ));
        }
        match tx.broker_ref.as_deref() {
            Some(broker) => match self.schedules.get(broker) {
                Some(schedule) => {
                    let charges = calculate_trade_charges(tx.price, tx.quantity, schedule)?;
                    Ok((charges, Decimal::ZERO))
                }
                None => {
                    debug!(
                        "Transaction {} references unknown broker '{}'; no charges applied",
                        tx.id, broker
                    );
                    Ok((TradeCharges::default(), Decimal::ZERO))
                }
            },
            None => Ok((TradeCharges::default(), Decimal::ZERO)),
        }
    }

    fn process_buy(&self, tx: &Transaction, ledger: &mut TickerLedger) -> Result<()> {
        let (charges, other_fees) = self.resolve_charges(tx)?;
        let total_charge = charges.total + other_fees;
        let gross = tx.price * tx.quantity;

        ledger.lots.push_back(Lot {
            acquired_at: tx.date,
            quantity: tx.quantity,
            cost_per_share: (gross + total_charge) / tx.quantity,
        });

        ledger.total_buy_cost += gross + total_charge;
        accumulate_fees(ledger, &charges, other_fees);
        Ok(())
    }

    fn process_sell(&self, tx: &Transaction, ledger: &mut TickerLedger) -> Result<()> {
        let (charges, other_fees) = self.resolve_charges(tx)?;
        let total_charge = charges.total + other_fees;

        let available = ledger.open_quantity();
        let mut quantity_to_match = tx.quantity;
        if quantity_to_match > available {
            let warning = LedgerWarning {
                transaction_id: tx.id.clone(),
                ticker: ledger.ticker.clone(),
                date: tx.date,
                message: format!(
                    "Sell quantity {} exceeds open quantity {}; matched the available amount only",
                    quantity_to_match, available
                ),
            };
            warn!("{}", warning);
            ledger.warnings.push(warning);
            quantity_to_match = available;
        }

        let (matched, cost_basis) =
            consume_lots(&mut ledger.lots, quantity_to_match, tx.date, self.selection);

        // Proceeds reflect the full recorded sale even when the match was
        // clamped; the warning above carries the anomaly.
        let net_proceeds = tx.price * tx.quantity - total_charge;
        ledger.realized_gains.push(RealizedGainRecord {
            ticker: ledger.ticker.clone(),
            date: tx.date,
            quantity_sold: matched,
            cost_basis,
            net_proceeds,
            gain: net_proceeds - cost_basis,
        });

        accumulate_fees(ledger, &charges, other_fees);
        Ok(())
    }
}

fn accumulate_fees(ledger: &mut TickerLedger, charges: &TradeCharges, other_fees: Decimal) {
    ledger.fees.commission += charges.commission;
    ledger.fees.sales_tax += charges.sales_tax;
    ledger.fees.depository_charge += charges.depository_charge;
    ledger.fees.other_fees += other_fees;
}

/// Consumes up to `quantity` shares from the queue in the policy's order and
/// returns `(matched quantity, cost basis of the matched shares)`.
///
/// Exhausted lots are dropped; a partially consumed lot keeps its
/// `cost_per_share` and stays at its place in the queue.
fn consume_lots(
    lots: &mut VecDeque<Lot>,
    quantity: Decimal,
    sell_date: NaiveDate,
    selection: LotSelection,
) -> (Decimal, Decimal) {
    if !quantity.is_sign_positive() || quantity.is_zero() {
        return (Decimal::ZERO, Decimal::ZERO);
    }

    let mut vec_lots: Vec<Lot> = lots.drain(..).collect();

    let order: Vec<usize> = match selection {
        LotSelection::FirstInFirstOut => (0..vec_lots.len()).collect(),
        LotSelection::IntradayFirst => {
            let same_day = (0..vec_lots.len()).filter(|&i| vec_lots[i].acquired_at == sell_date);
            let standing = (0..vec_lots.len()).filter(|&i| vec_lots[i].acquired_at != sell_date);
            same_day.chain(standing).collect()
        }
    };

    let mut remaining = quantity;
    let mut matched = Decimal::ZERO;
    let mut cost_basis = Decimal::ZERO;

    for index in order {
        if remaining.is_zero() || remaining.is_sign_negative() {
            break;
        }
        let lot = &mut vec_lots[index];
        if !lot.quantity.is_sign_positive() {
            continue;
        }
        let consumed = lot.quantity.min(remaining);
        cost_basis += consumed * lot.cost_per_share;
        lot.quantity -= consumed;
        matched += consumed;
        remaining -= consumed;
    }

    vec_lots.retain(|lot| lot.quantity.is_sign_positive() && is_quantity_significant(&lot.quantity));
    *lots = vec_lots.into();

    (matched, cost_basis)
}
