use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Portfolio-wide dividend income.
///
/// Gross, withholding tax, and net are aggregated separately; presentation
/// layers need all three. The breakdowns hold net amounts.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DividendSummary {
    pub gross: Decimal,
    pub withholding_tax: Decimal,
    pub net: Decimal,
    pub by_ticker: HashMap<String, Decimal>,
    pub by_year: HashMap<i32, Decimal>,
}

impl DividendSummary {
    pub fn add(&mut self, ticker: &str, year: i32, gross: Decimal, withholding_tax: Decimal) {
        let net = gross - withholding_tax;
        self.gross += gross;
        self.withholding_tax += withholding_tax;
        self.net += net;
        *self.by_ticker.entry(ticker.to_string()).or_default() += net;
        *self.by_year.entry(year).or_default() += net;
    }
}
