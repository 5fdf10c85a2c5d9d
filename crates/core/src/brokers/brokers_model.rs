use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

/// How a broker's commission is computed.
///
/// A closed enum so that adding a commission model is a compile-time
/// decision: every evaluator match must handle the new variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionKind {
    /// `rate1` percent of gross trade value.
    Percentage,
    /// `rate1` per share.
    PerShare,
    /// The greater of `rate2` per share and `rate1` percent of trade value.
    HigherOf,
    /// Flat `rate1` per trade.
    Fixed,
    /// Tiered schedule. No tier table is configured anywhere today, so this
    /// evaluates as `Percentage` on `rate1`; an intentional fallback rather
    /// than a guessed tier lookup.
    Slab,
}

impl CommissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionKind::Percentage => "PERCENTAGE",
            CommissionKind::PerShare => "PER_SHARE",
            CommissionKind::HigherOf => "HIGHER_OF",
            CommissionKind::Fixed => "FIXED",
            CommissionKind::Slab => "SLAB",
        }
    }
}

/// How the depository (CDC) charge is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositoryKind {
    /// `depository_rate` per share.
    PerShare,
    /// Flat `depository_rate` per trade.
    Fixed,
    /// The greater of `depository_rate` per share and `depository_min`.
    HigherOf,
}

impl DepositoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositoryKind::PerShare => "PER_SHARE",
            DepositoryKind::Fixed => "FIXED",
            DepositoryKind::HigherOf => "HIGHER_OF",
        }
    }
}

/// A broker's charge configuration.
///
/// Rates the declared kind requires must be present; optional fields default
/// to zero. Sales tax is levied on the commission amount, never on gross
/// trade value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerFeeSchedule {
    pub commission_kind: CommissionKind,
    #[serde(default)]
    pub rate1: Option<Decimal>,
    #[serde(default)]
    pub rate2: Option<Decimal>,
    #[serde(default)]
    pub sales_tax_rate: Option<Decimal>,
    pub depository_kind: DepositoryKind,
    #[serde(default)]
    pub depository_rate: Option<Decimal>,
    #[serde(default)]
    pub depository_min: Option<Decimal>,
}

fn require(
    value: Option<Decimal>,
    kind: &'static str,
    field: &'static str,
) -> std::result::Result<Decimal, ConfigurationError> {
    value.ok_or(ConfigurationError::MissingRate { kind, field })
}

impl BrokerFeeSchedule {
    /// Checks that every configured rate is non-negative and that the
    /// declared kinds carry the rates they need. Runs before every
    /// evaluation; a misconfigured schedule is never silently clamped.
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        let fields = [
            ("rate1", self.rate1),
            ("rate2", self.rate2),
            ("salesTaxRate", self.sales_tax_rate),
            ("depositoryRate", self.depository_rate),
            ("depositoryMin", self.depository_min),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                if value.is_sign_negative() {
                    return Err(ConfigurationError::NegativeRate { field, value });
                }
            }
        }

        match self.commission_kind {
            CommissionKind::Percentage | CommissionKind::PerShare | CommissionKind::Fixed => {
                require(self.rate1, self.commission_kind.as_str(), "rate1")?;
            }
            CommissionKind::Slab => {
                require(self.rate1, self.commission_kind.as_str(), "rate1")?;
            }
            CommissionKind::HigherOf => {
                require(self.rate1, self.commission_kind.as_str(), "rate1")?;
                require(self.rate2, self.commission_kind.as_str(), "rate2")?;
            }
        }

        match self.depository_kind {
            DepositoryKind::PerShare | DepositoryKind::Fixed => {
                require(
                    self.depository_rate,
                    self.depository_kind.as_str(),
                    "depositoryRate",
                )?;
            }
            DepositoryKind::HigherOf => {
                require(
                    self.depository_rate,
                    self.depository_kind.as_str(),
                    "depositoryRate",
                )?;
                require(
                    self.depository_min,
                    self.depository_kind.as_str(),
                    "depositoryMin",
                )?;
            }
        }
        Ok(())
    }

    pub fn sales_tax_pct(&self) -> Decimal {
        self.sales_tax_rate.unwrap_or(Decimal::ZERO)
    }
}

/// Itemized charges for one trade. Unrounded: presentation layers round,
/// the engine never does, so rounding error cannot compound across trades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeCharges {
    pub commission: Decimal,
    pub sales_tax: Decimal,
    pub depository_charge: Decimal,
    pub total: Decimal,
}

impl TradeCharges {
    pub fn new(commission: Decimal, sales_tax: Decimal, depository_charge: Decimal) -> Self {
        TradeCharges {
            commission,
            sales_tax,
            depository_charge,
            total: commission + sales_tax + depository_charge,
        }
    }
}
