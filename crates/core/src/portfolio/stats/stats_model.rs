use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::portfolio::holdings::Holding;
use crate::portfolio::income::DividendSummary;
use crate::portfolio::ledger::{LedgerWarning, RealizedGainRecord};

/// Lifetime charges by category.
///
/// Capital-gains tax sits apart from the per-trade charges: it is levied at
/// filing time, not trade time, and is reported independently.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeeTotals {
    pub commission: Decimal,
    pub sales_tax: Decimal,
    pub depository_charge: Decimal,
    pub other_fees: Decimal,
    pub annual_fees: Decimal,
    pub capital_gains_tax: Decimal,
}

impl FeeTotals {
    pub fn total(&self) -> Decimal {
        self.commission
            + self.sales_tax
            + self.depository_charge
            + self.other_fees
            + self.annual_fees
            + self.capital_gains_tax
    }
}

/// The full portfolio report: a pure function of the transaction log, the
/// fee schedules, and the price map. No hidden state - callers recompute it
/// whenever an input changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub as_of: NaiveDate,
    /// Holdings market value plus free cash.
    pub total_value: Decimal,
    pub holdings_value: Decimal,
    pub total_cost_basis: Decimal,
    /// Uninvested cash: deposits - withdrawals - buy costs + sell proceeds
    /// + net dividends - annual fees - adjustments.
    pub free_cash: Decimal,
    pub unrealized_gain: Decimal,
    pub realized_gain: Decimal,
    /// Realized gain minus capital-gains tax.
    pub realized_gain_net_of_tax: Decimal,
    pub dividends: DividendSummary,
    pub fees: FeeTotals,
    /// Deposits minus withdrawals over the whole log.
    pub net_principal: Decimal,
    /// Highest the net principal has ever stood.
    pub peak_principal: Decimal,
    /// Simple (non-annualized) return over the period, percent.
    pub simple_return: Decimal,
    /// Annualized money-weighted return (XIRR), percent.
    pub annualized_mwr: Decimal,
    pub holdings: Vec<Holding>,
    pub realized_history: Vec<RealizedGainRecord>,
    pub warnings: Vec<LedgerWarning>,
}

impl PortfolioStats {
    /// Display projection: everything at presentation precision. The engine
    /// itself never rounds, so rounding error cannot compound across trades;
    /// this is the one place precision is dropped.
    pub fn rounded(mut self) -> Self {
        let dp = DISPLAY_DECIMAL_PRECISION;
        self.total_value = self.total_value.round_dp(dp);
        self.holdings_value = self.holdings_value.round_dp(dp);
        self.total_cost_basis = self.total_cost_basis.round_dp(dp);
        self.free_cash = self.free_cash.round_dp(dp);
        self.unrealized_gain = self.unrealized_gain.round_dp(dp);
        self.realized_gain = self.realized_gain.round_dp(dp);
        self.realized_gain_net_of_tax = self.realized_gain_net_of_tax.round_dp(dp);
        self.net_principal = self.net_principal.round_dp(dp);
        self.peak_principal = self.peak_principal.round_dp(dp);
        self.simple_return = self.simple_return.round_dp(dp);
        self.annualized_mwr = self.annualized_mwr.round_dp(dp);

        self.dividends.gross = self.dividends.gross.round_dp(dp);
        self.dividends.withholding_tax = self.dividends.withholding_tax.round_dp(dp);
        self.dividends.net = self.dividends.net.round_dp(dp);
        for value in self.dividends.by_ticker.values_mut() {
            *value = value.round_dp(dp);
        }
        for value in self.dividends.by_year.values_mut() {
            *value = value.round_dp(dp);
        }

        self.fees.commission = self.fees.commission.round_dp(dp);
        self.fees.sales_tax = self.fees.sales_tax.round_dp(dp);
        self.fees.depository_charge = self.fees.depository_charge.round_dp(dp);
        self.fees.other_fees = self.fees.other_fees.round_dp(dp);
        self.fees.annual_fees = self.fees.annual_fees.round_dp(dp);
        self.fees.capital_gains_tax = self.fees.capital_gains_tax.round_dp(dp);

        for holding in &mut self.holdings {
            holding.average_cost = holding.average_cost.round_dp(dp);
            holding.total_cost_basis = holding.total_cost_basis.round_dp(dp);
            holding.market_value = holding.market_value.round_dp(dp);
            holding.unrealized_gain = holding.unrealized_gain.round_dp(dp);
            holding.weight = holding.weight.round_dp(dp);
        }
        for record in &mut self.realized_history {
            record.cost_basis = record.cost_basis.round_dp(dp);
            record.net_proceeds = record.net_proceeds.round_dp(dp);
            record.gain = record.gain.round_dp(dp);
        }
        self
    }
}
