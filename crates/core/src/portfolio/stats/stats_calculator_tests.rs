#[cfg(test)]
mod tests {
    use crate::portfolio::stats::PortfolioStatsCalculator;
    use crate::transactions::{Transaction, TransactionKind};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(id: &str, ticker: &str, kind: TransactionKind, quantity: Decimal, price: Decimal, on: NaiveDate) -> Transaction {
        Transaction {
            id: id.to_string(),
            ticker: ticker.to_string(),
            kind,
            quantity,
            price,
            date: on,
            broker_ref: None,
            commission: Decimal::ZERO,
            tax: Decimal::ZERO,
            depository_charge: Decimal::ZERO,
            other_fees: Decimal::ZERO,
        }
    }

    fn deposit(id: &str, amount: Decimal, on: NaiveDate) -> Transaction {
        tx(id, "", TransactionKind::Deposit, Decimal::ZERO, amount, on)
    }

    fn calculator() -> PortfolioStatsCalculator {
        PortfolioStatsCalculator::new(HashMap::new())
    }

    #[test]
    fn full_round_trip_leaves_only_cash_and_realized_gain() {
        let d1 = date(2024, 1, 1);
        let mut buy = tx("b1", "OGDC", TransactionKind::Buy, dec!(100), dec!(100), d1);
        buy.commission = dec!(15);
        buy.tax = dec!(2.25);
        buy.depository_charge = dec!(0.5);
        let mut sell = tx("s1", "OGDC", TransactionKind::Sell, dec!(100), dec!(120), date(2024, 1, 10));
        sell.commission = dec!(18);
        sell.tax = dec!(2.7);
        sell.depository_charge = dec!(0.5);

        let log = vec![deposit("dep", dec!(20000), d1), buy, sell];
        let stats = calculator()
            .calculate(&log, &HashMap::new(), date(2024, 1, 31))
            .unwrap();

        assert!(stats.holdings.is_empty());
        assert_eq!(stats.realized_gain, dec!(1961.05));
        assert_eq!(stats.free_cash, dec!(20000) - dec!(10017.75) + dec!(11978.8));
        assert_eq!(stats.total_value, stats.free_cash);
        assert_eq!(stats.fees.commission, dec!(33));
        assert_eq!(stats.fees.sales_tax, dec!(4.95));
        assert_eq!(stats.fees.depository_charge, dec!(1));
        assert!(stats.warnings.is_empty());

        let record = &stats.realized_history[0];
        assert_eq!(record.cost_basis, dec!(10017.75));
        assert_eq!(record.net_proceeds, dec!(11978.8));
        assert_eq!(record.gain, dec!(1961.05));
    }

    #[test]
    fn open_position_is_valued_at_the_quote() {
        let d1 = date(2024, 3, 1);
        let log = vec![
            deposit("dep", dec!(50000), d1),
            tx("b1", "LUCK", TransactionKind::Buy, dec!(50), dec!(640), d1),
        ];
        let mut prices = HashMap::new();
        prices.insert("LUCK".to_string(), dec!(700));

        let stats = calculator()
            .calculate(&log, &prices, date(2024, 6, 1))
            .unwrap();

        assert_eq!(stats.holdings.len(), 1);
        let holding = &stats.holdings[0];
        assert_eq!(holding.quantity, dec!(50));
        assert_eq!(holding.market_value, dec!(35000));
        assert_eq!(holding.unrealized_gain, dec!(3000));
        assert!(!holding.price_stale);
        assert_eq!(holding.weight, dec!(100));

        assert_eq!(stats.free_cash, dec!(18000));
        assert_eq!(stats.total_value, dec!(53000));
        assert_eq!(stats.unrealized_gain, dec!(3000));
    }

    #[test]
    fn missing_quote_flags_the_holding_stale() {
        let d1 = date(2024, 3, 1);
        let log = vec![tx("b1", "MARI", TransactionKind::Buy, dec!(10), dec!(98), d1)];
        let stats = calculator()
            .calculate(&log, &HashMap::new(), date(2024, 6, 1))
            .unwrap();
        let holding = &stats.holdings[0];
        assert!(holding.price_stale);
        assert_eq!(holding.current_price, dec!(98));
    }

    #[test]
    fn dividend_feeds_income_and_free_cash() {
        let d1 = date(2024, 1, 1);
        let mut dividend = tx("d1", "HBL", TransactionKind::Dividend, dec!(50), dec!(5), date(2024, 6, 1));
        dividend.tax = dec!(37.5);
        let log = vec![
            deposit("dep", dec!(10000), d1),
            tx("b1", "HBL", TransactionKind::Buy, dec!(50), dec!(150), d1),
            dividend,
        ];
        let stats = calculator()
            .calculate(&log, &HashMap::new(), date(2024, 7, 1))
            .unwrap();

        assert_eq!(stats.dividends.gross, dec!(250));
        assert_eq!(stats.dividends.withholding_tax, dec!(37.5));
        assert_eq!(stats.dividends.net, dec!(212.5));
        // 10000 - 7500 spent + 212.5 net dividend
        assert_eq!(stats.free_cash, dec!(2712.5));
    }

    #[test]
    fn annual_fees_and_adjustments_reduce_cash_and_show_in_fees() {
        let d1 = date(2024, 1, 1);
        let log = vec![
            deposit("dep", dec!(5000), d1),
            tx("f1", "", TransactionKind::AnnualFee, Decimal::ZERO, dec!(600), date(2024, 2, 1)),
            tx("t1", "", TransactionKind::TaxAdjustment, Decimal::ZERO, dec!(150), date(2024, 3, 1)),
            tx("h1", "", TransactionKind::HistoricalAdjustment, Decimal::ZERO, dec!(50), date(2024, 3, 2)),
        ];
        let stats = calculator()
            .calculate(&log, &HashMap::new(), date(2024, 4, 1))
            .unwrap();

        assert_eq!(stats.free_cash, dec!(4200));
        assert_eq!(stats.fees.annual_fees, dec!(600));
        assert_eq!(stats.fees.capital_gains_tax, dec!(150));
        assert_eq!(stats.realized_gain_net_of_tax, dec!(-150));
    }

    #[test]
    fn principal_tracking_net_and_peak() {
        let log = vec![
            deposit("d1", dec!(10000), date(2023, 1, 1)),
            deposit("d2", dec!(5000), date(2023, 6, 1)),
            tx("w1", "", TransactionKind::Withdrawal, Decimal::ZERO, dec!(8000), date(2023, 9, 1)),
            deposit("d3", dec!(1000), date(2024, 1, 1)),
        ];
        let stats = calculator()
            .calculate(&log, &HashMap::new(), date(2024, 2, 1))
            .unwrap();

        assert_eq!(stats.net_principal, dec!(8000));
        assert_eq!(stats.peak_principal, dec!(15000));
    }

    #[test]
    fn simple_return_and_money_weighted_return_both_exposed() {
        // 1,000 in, grown to 1,100 exactly one year later.
        let d1 = date(2023, 1, 1);
        let log = vec![
            deposit("dep", dec!(1000), d1),
            tx("b1", "PSO", TransactionKind::Buy, dec!(10), dec!(100), d1),
        ];
        let mut prices = HashMap::new();
        prices.insert("PSO".to_string(), dec!(110));

        let stats = calculator().calculate(&log, &prices, date(2024, 1, 1)).unwrap();

        assert_eq!(stats.simple_return, dec!(10));
        assert!((stats.annualized_mwr - dec!(10)).abs() < dec!(0.01));
    }

    #[test]
    fn weights_split_across_holdings() {
        let d1 = date(2024, 1, 1);
        let log = vec![
            tx("b1", "OGDC", TransactionKind::Buy, dec!(100), dec!(100), d1),
            tx("b2", "PPL", TransactionKind::Buy, dec!(100), dec!(300), d1),
        ];
        let mut prices = HashMap::new();
        prices.insert("OGDC".to_string(), dec!(100));
        prices.insert("PPL".to_string(), dec!(300));

        let stats = calculator().calculate(&log, &prices, date(2024, 2, 1)).unwrap();

        let by_ticker: std::collections::HashMap<_, _> = stats
            .holdings
            .iter()
            .map(|h| (h.ticker.clone(), h.weight))
            .collect();
        assert_eq!(by_ticker["OGDC"], dec!(25));
        assert_eq!(by_ticker["PPL"], dec!(75));
    }

    #[test]
    fn malformed_record_is_skipped_with_warning_not_fatal() {
        let d1 = date(2024, 1, 1);
        let mut bad = tx("bad", "OGDC", TransactionKind::Buy, dec!(10), dec!(100), d1);
        bad.commission = dec!(-5);
        let log = vec![bad, tx("b1", "OGDC", TransactionKind::Buy, dec!(10), dec!(100), d1)];

        let stats = calculator()
            .calculate(&log, &HashMap::new(), date(2024, 2, 1))
            .unwrap();

        assert_eq!(stats.warnings.len(), 1);
        assert_eq!(stats.warnings[0].transaction_id, "bad");
        assert_eq!(stats.holdings[0].quantity, dec!(10));
    }

    #[test]
    fn over_sell_warning_reaches_the_portfolio_report() {
        let d1 = date(2024, 1, 1);
        let log = vec![
            tx("b1", "OGDC", TransactionKind::Buy, dec!(50), dec!(10), d1),
            tx("s1", "OGDC", TransactionKind::Sell, dec!(80), dec!(12), date(2024, 1, 5)),
        ];
        let stats = calculator()
            .calculate(&log, &HashMap::new(), date(2024, 2, 1))
            .unwrap();
        assert_eq!(stats.warnings.len(), 1);
        assert!(stats.warnings[0].message.contains("exceeds open quantity"));
        assert!(stats.holdings.is_empty());
    }

    #[test]
    fn rounded_projection_applies_display_precision() {
        let d1 = date(2024, 1, 1);
        let log = vec![
            deposit("dep", dec!(10000), d1),
            tx("b1", "OGDC", TransactionKind::Buy, dec!(3), dec!(99.99), d1),
        ];
        let mut prices = HashMap::new();
        prices.insert("OGDC".to_string(), dec!(103.333));

        let stats = calculator()
            .calculate(&log, &prices, date(2024, 2, 1))
            .unwrap()
            .rounded();

        assert_eq!(stats.holdings[0].market_value, dec!(310.00));
        assert_eq!(stats.simple_return, stats.simple_return.round_dp(2));
    }
}
