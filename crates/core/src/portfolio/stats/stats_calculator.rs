use chrono::NaiveDate;
use log::{debug, warn};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::brokers::BrokerFeeSchedule;
use crate::errors::Result;
use crate::portfolio::holdings::{value_holding, Holding};
use crate::portfolio::income::{aggregate_dividends, sum_capital_gains_tax, sum_realized_gains};
use crate::portfolio::ledger::{
    trades_by_ticker, LedgerCalculator, LedgerWarning, LotSelection, TickerLedger,
};
use crate::portfolio::performance::{simple_return, xirr, CashFlow};
use crate::portfolio::stats::{FeeTotals, PortfolioStats};
use crate::transactions::{chronological, Transaction, TransactionKind};

/// Top-level orchestrator: transaction log + fee schedules + price map in,
/// one `PortfolioStats` out.
///
/// Combines the per-ticker ledger runs with valuation, income aggregation,
/// free-cash bookkeeping, and the return solver. It performs no matching or
/// fee arithmetic itself; those stay in their own calculators.
#[derive(Clone)]
pub struct PortfolioStatsCalculator {
    schedules: HashMap<String, BrokerFeeSchedule>,
    selection: LotSelection,
}

impl PortfolioStatsCalculator {
    pub fn new(schedules: HashMap<String, BrokerFeeSchedule>) -> Self {
        PortfolioStatsCalculator {
            schedules,
            selection: LotSelection::default(),
        }
    }

    /// Same orchestration with a different lot-selection policy; what-if
    /// simulation callers pass `IntradayFirst` here.
    pub fn with_selection(
        schedules: HashMap<String, BrokerFeeSchedule>,
        selection: LotSelection,
    ) -> Self {
        PortfolioStatsCalculator {
            schedules,
            selection,
        }
    }

    /// Recomputes the whole portfolio from scratch.
    ///
    /// `as_of` dates the terminal valuation flow for the return solver; the
    /// engine never reads the wall clock. Malformed records are skipped with
    /// a warning on the result; only a misconfigured fee schedule fails.
    pub fn calculate(
        &self,
        transactions: &[Transaction],
        prices: &HashMap<String, Decimal>,
        as_of: NaiveDate,
    ) -> Result<PortfolioStats> {
        debug!(
            "Calculating portfolio stats over {} transactions as of {}",
            transactions.len(),
            as_of
        );

        let ordered = chronological(transactions);

        // One bad record must not corrupt the rest of the log.
        let mut warnings: Vec<LedgerWarning> = Vec::new();
        let mut valid: Vec<&Transaction> = Vec::with_capacity(ordered.len());
        for tx in ordered {
            match tx.validate() {
                Ok(()) => valid.push(tx),
                Err(e) => {
                    let warning = LedgerWarning {
                        transaction_id: tx.id.clone(),
                        ticker: tx.ticker.clone(),
                        date: tx.date,
                        message: format!("Skipped: {}", e),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        // Each ticker's run is independent and internally ordered, so the
        // fan-out is safe; no cross-ticker ordering is needed.
        let ledger_calculator = LedgerCalculator::with_selection(&self.schedules, self.selection);
        let groups = trades_by_ticker(&valid);
        let ledgers: Vec<TickerLedger> = groups
            .par_iter()
            .map(|(ticker, ticker_txs)| ledger_calculator.calculate_ticker(ticker, ticker_txs))
            .collect::<Result<Vec<_>>>()?;

        let mut holdings: Vec<Holding> = ledgers
            .iter()
            .filter_map(|ledger| value_holding(ledger, prices.get(&ledger.ticker).copied()))
            .collect();

        let holdings_value: Decimal = holdings.iter().map(|h| h.market_value).sum();
        let total_cost_basis: Decimal = holdings.iter().map(|h| h.total_cost_basis).sum();
        let unrealized_gain: Decimal = holdings.iter().map(|h| h.unrealized_gain).sum();
        if !holdings_value.is_zero() {
            for holding in &mut holdings {
                holding.weight = holding.market_value / holdings_value * Decimal::ONE_HUNDRED;
            }
        }

        let dividends = aggregate_dividends(&valid);
        let capital_gains_tax = sum_capital_gains_tax(&valid);

        // Cash bookkeeping and the external-flow history, one chronological
        // walk.
        let mut deposits = Decimal::ZERO;
        let mut withdrawals = Decimal::ZERO;
        let mut annual_fees = Decimal::ZERO;
        let mut adjustments = Decimal::ZERO;
        let mut net_principal = Decimal::ZERO;
        let mut peak_principal = Decimal::ZERO;
        let mut cash_flows: Vec<CashFlow> = Vec::new();

        for tx in &valid {
            let amount = tx.amount();
            match tx.kind {
                TransactionKind::Deposit => {
                    deposits += amount;
                    net_principal += amount;
                    peak_principal = peak_principal.max(net_principal);
                    cash_flows.push(CashFlow::contribution(amount, tx.date));
                }
                TransactionKind::Withdrawal => {
                    withdrawals += amount;
                    net_principal -= amount;
                    cash_flows.push(CashFlow::distribution(amount, tx.date));
                }
                TransactionKind::AnnualFee => annual_fees += amount,
                TransactionKind::TaxAdjustment | TransactionKind::HistoricalAdjustment => {
                    adjustments += amount;
                }
                TransactionKind::Buy
                | TransactionKind::Sell
                | TransactionKind::Dividend => {}
            }
        }

        let total_buy_cost: Decimal = ledgers.iter().map(|l| l.total_buy_cost).sum();
        let total_sell_proceeds: Decimal = ledgers.iter().map(|l| l.total_sell_proceeds()).sum();
        let free_cash = deposits - withdrawals - total_buy_cost + total_sell_proceeds
            + dividends.net
            - annual_fees
            - adjustments;
        let total_value = holdings_value + free_cash;

        if total_value.is_sign_positive() && !total_value.is_zero() {
            cash_flows.push(CashFlow::distribution(total_value, as_of));
        }

        let mut fees = FeeTotals {
            annual_fees,
            capital_gains_tax,
            ..FeeTotals::default()
        };
        for ledger in &ledgers {
            fees.commission += ledger.fees.commission;
            fees.sales_tax += ledger.fees.sales_tax;
            fees.depository_charge += ledger.fees.depository_charge;
            fees.other_fees += ledger.fees.other_fees;
        }

        let realized_gain = sum_realized_gains(&ledgers);

        let mut realized_history: Vec<_> = ledgers
            .iter()
            .flat_map(|ledger| ledger.realized_gains.iter().cloned())
            .collect();
        realized_history.sort_by(|a, b| (a.date, &a.ticker).cmp(&(b.date, &b.ticker)));

        for ledger in &ledgers {
            warnings.extend(ledger.warnings.iter().cloned());
        }

        Ok(PortfolioStats {
            as_of,
            total_value,
            holdings_value,
            total_cost_basis,
            free_cash,
            unrealized_gain,
            realized_gain,
            realized_gain_net_of_tax: realized_gain - capital_gains_tax,
            dividends,
            fees,
            net_principal,
            peak_principal,
            simple_return: simple_return(total_value, withdrawals, deposits),
            annualized_mwr: xirr(&cash_flows),
            holdings,
            realized_history,
            warnings,
        })
    }
}
