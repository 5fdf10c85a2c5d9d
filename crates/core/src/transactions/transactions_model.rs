use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ValidationError;

/// The kind of a transaction.
///
/// Trade kinds (`Buy`, `Sell`) and `Dividend` act on a ticker; the cash kinds
/// act on the portfolio's cash balance only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Buy,
    Sell,
    Dividend,
    TaxAdjustment,
    Deposit,
    Withdrawal,
    AnnualFee,
    HistoricalAdjustment,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Buy => "BUY",
            TransactionKind::Sell => "SELL",
            TransactionKind::Dividend => "DIVIDEND",
            TransactionKind::TaxAdjustment => "TAX_ADJUSTMENT",
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
            TransactionKind::AnnualFee => "ANNUAL_FEE",
            TransactionKind::HistoricalAdjustment => "HISTORICAL_ADJUSTMENT",
        }
    }

    /// BUY or SELL - the kinds the lot ledger consumes.
    pub fn is_trade(&self) -> bool {
        matches!(self, TransactionKind::Buy | TransactionKind::Sell)
    }

    /// Kinds that move cash without touching any lot queue.
    pub fn is_cash(&self) -> bool {
        matches!(
            self,
            TransactionKind::Deposit
                | TransactionKind::Withdrawal
                | TransactionKind::AnnualFee
                | TransactionKind::TaxAdjustment
                | TransactionKind::HistoricalAdjustment
        )
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TransactionKind::Buy),
            "SELL" => Ok(TransactionKind::Sell),
            "DIVIDEND" => Ok(TransactionKind::Dividend),
            "TAX_ADJUSTMENT" => Ok(TransactionKind::TaxAdjustment),
            "DEPOSIT" => Ok(TransactionKind::Deposit),
            "WITHDRAWAL" => Ok(TransactionKind::Withdrawal),
            "ANNUAL_FEE" => Ok(TransactionKind::AnnualFee),
            "HISTORICAL_ADJUSTMENT" => Ok(TransactionKind::HistoricalAdjustment),
            other => Err(format!("Unknown transaction kind: {}", other)),
        }
    }
}

/// An immutable portfolio event.
///
/// Quantity and price are non-negative; charge fields default to zero. For
/// trades, `tax` is the sales tax levied on the commission; for dividends it
/// is the withholding tax deducted at source. The engine never mutates or
/// persists transactions - they are owned by the caller's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub ticker: String,
    pub kind: TransactionKind,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub price: Decimal,
    pub date: NaiveDate,
    /// Identifier of the broker whose fee schedule applies when no charges
    /// are recorded on the transaction itself.
    #[serde(default)]
    pub broker_ref: Option<String>,
    #[serde(default)]
    pub commission: Decimal,
    #[serde(default)]
    pub tax: Decimal,
    #[serde(default)]
    pub depository_charge: Decimal,
    #[serde(default)]
    pub other_fees: Decimal,
}

impl Transaction {
    /// Cash amount of the event.
    ///
    /// Cash-kind entries occur in two conventions: `quantity * price`
    /// (e.g. a dividend of N shares at D per share) and a bare amount in
    /// `price` with quantity unset.
    pub fn amount(&self) -> Decimal {
        if self.quantity.is_sign_positive() && !self.quantity.is_zero() {
            self.quantity * self.price
        } else {
            self.price
        }
    }

    /// Sum of the charges recorded directly on the transaction.
    pub fn recorded_charges(&self) -> Decimal {
        self.commission + self.tax + self.depository_charge + self.other_fees
    }

    /// Whether any charge was recorded on the transaction itself, as opposed
    /// to being derivable from the broker's fee schedule.
    pub fn has_recorded_charges(&self) -> bool {
        !self.recorded_charges().is_zero()
    }

    /// Checks the non-negativity invariants. A violation names the field so
    /// the caller can skip this record and keep processing the rest.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let fields = [
            ("quantity", self.quantity),
            ("price", self.price),
            ("commission", self.commission),
            ("tax", self.tax),
            ("depositoryCharge", self.depository_charge),
            ("otherFees", self.other_fees),
        ];
        for (field, value) in fields {
            if value.is_sign_negative() {
                return Err(ValidationError::NegativeValue {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// A raw transaction record as produced by imports, document scans, or
/// manual-entry forms before type checking. All fields are strings; absent
/// charge fields default to zero on conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub id: String,
    pub ticker: String,
    pub kind: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    pub date: String,
    #[serde(default)]
    pub broker_ref: Option<String>,
    #[serde(default)]
    pub commission: Option<String>,
    #[serde(default)]
    pub tax: Option<String>,
    #[serde(default)]
    pub depository_charge: Option<String>,
    #[serde(default)]
    pub other_fees: Option<String>,
}

fn parse_decimal_field(
    id: &str,
    field: &'static str,
    value: Option<&String>,
) -> std::result::Result<Decimal, ValidationError> {
    match value {
        None => Ok(Decimal::ZERO),
        Some(raw) if raw.trim().is_empty() => Ok(Decimal::ZERO),
        Some(raw) => Decimal::from_str(raw.trim()).map_err(|_| ValidationError::DecimalField {
            id: id.to_string(),
            field,
            value: raw.clone(),
        }),
    }
}

impl TryFrom<TransactionDraft> for Transaction {
    type Error = ValidationError;

    fn try_from(draft: TransactionDraft) -> std::result::Result<Self, Self::Error> {
        if draft.id.trim().is_empty() {
            return Err(ValidationError::MissingField {
                id: "<unidentified>".to_string(),
                field: "id",
            });
        }

        let kind =
            TransactionKind::from_str(&draft.kind).map_err(|_| ValidationError::UnknownKind {
                id: draft.id.clone(),
                value: draft.kind.clone(),
            })?;

        let date = NaiveDate::parse_from_str(draft.date.trim(), "%Y-%m-%d").map_err(|source| {
            ValidationError::DateField {
                id: draft.id.clone(),
                value: draft.date.clone(),
                source,
            }
        })?;

        let transaction = Transaction {
            quantity: parse_decimal_field(&draft.id, "quantity", draft.quantity.as_ref())?,
            price: parse_decimal_field(&draft.id, "price", draft.price.as_ref())?,
            commission: parse_decimal_field(&draft.id, "commission", draft.commission.as_ref())?,
            tax: parse_decimal_field(&draft.id, "tax", draft.tax.as_ref())?,
            depository_charge: parse_decimal_field(
                &draft.id,
                "depositoryCharge",
                draft.depository_charge.as_ref(),
            )?,
            other_fees: parse_decimal_field(&draft.id, "otherFees", draft.other_fees.as_ref())?,
            id: draft.id,
            ticker: draft.ticker,
            kind,
            date,
            broker_ref: draft.broker_ref,
        };
        transaction.validate()?;
        Ok(transaction)
    }
}

/// Converts a batch of drafts, collecting per-record errors instead of
/// aborting on the first bad row.
pub fn parse_drafts(drafts: Vec<TransactionDraft>) -> (Vec<Transaction>, Vec<ValidationError>) {
    let mut transactions = Vec::with_capacity(drafts.len());
    let mut errors = Vec::new();
    for draft in drafts {
        match Transaction::try_from(draft) {
            Ok(tx) => transactions.push(tx),
            Err(e) => {
                warn!("Skipping unparsable transaction record: {}", e);
                errors.push(e);
            }
        }
    }
    (transactions, errors)
}

/// Returns references to the transactions in chronological order. The sort
/// is stable, so same-day records keep their recorded order.
pub fn chronological(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|tx| tx.date);
    ordered
}
