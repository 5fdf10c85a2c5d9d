#[cfg(test)]
mod tests {
    use crate::portfolio::holdings::value_holding;
    use crate::portfolio::ledger::{Lot, TickerLedger};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ledger_with_lots(lots: &[(Decimal, Decimal)]) -> TickerLedger {
        let mut ledger = TickerLedger::new("MARI");
        for (quantity, cost_per_share) in lots {
            ledger.lots.push_back(Lot {
                acquired_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                quantity: *quantity,
                cost_per_share: *cost_per_share,
            });
        }
        ledger.last_trade_price = Some(dec!(98));
        ledger
    }

    #[test]
    fn values_open_lots_at_quote() {
        let ledger = ledger_with_lots(&[(dec!(60), dec!(100)), (dec!(40), dec!(110))]);
        let holding = value_holding(&ledger, Some(dec!(120))).unwrap();

        assert_eq!(holding.quantity, dec!(100));
        assert_eq!(holding.total_cost_basis, dec!(10400));
        assert_eq!(holding.average_cost, dec!(104));
        assert_eq!(holding.market_value, dec!(12000));
        assert_eq!(holding.unrealized_gain, dec!(1600));
        assert!(!holding.price_stale);
    }

    #[test]
    fn missing_quote_falls_back_to_last_trade_price_and_flags() {
        let ledger = ledger_with_lots(&[(dec!(10), dec!(100))]);
        let holding = value_holding(&ledger, None).unwrap();

        assert!(holding.price_stale);
        assert_eq!(holding.current_price, dec!(98));
        assert_eq!(holding.market_value, dec!(980));
        assert_eq!(holding.unrealized_gain, dec!(-20));
    }

    #[test]
    fn no_open_quantity_means_no_holding() {
        let ledger = ledger_with_lots(&[]);
        assert!(value_holding(&ledger, Some(dec!(50))).is_none());
    }

    #[test]
    fn valuation_consistency_holds_at_extreme_prices() {
        let ledger = ledger_with_lots(&[(dec!(33), dec!(101.5))]);
        for price in [Decimal::ZERO, dec!(0.0001), dec!(1000000000)] {
            let holding = value_holding(&ledger, Some(price)).unwrap();
            assert_eq!(
                holding.market_value - holding.total_cost_basis,
                holding.unrealized_gain
            );
        }
    }
}
