#[cfg(test)]
mod tests {
    use crate::portfolio::performance::{simple_return, xirr, CashFlow};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn flow(amount: Decimal, y: i32, m: u32, d: u32) -> CashFlow {
        CashFlow {
            amount,
            date: date(y, m, d),
        }
    }

    #[test]
    fn one_year_round_trip_matches_the_plain_return() {
        // 2023-01-01 to 2024-01-01 is exactly 365 days.
        let flows = [flow(dec!(-1000), 2023, 1, 1), flow(dec!(1100), 2024, 1, 1)];
        let rate = xirr(&flows);
        assert!((rate - dec!(10)).abs() < dec!(0.01), "got {}", rate);
    }

    #[test]
    fn equal_in_and_out_is_zero_return() {
        let flows = [flow(dec!(-1000), 2023, 1, 1), flow(dec!(1000), 2024, 1, 1)];
        let rate = xirr(&flows);
        assert!(rate.abs() < dec!(0.01), "got {}", rate);
    }

    #[test]
    fn doubling_over_two_years_annualizes_to_root_two() {
        // 730 days; (1+r)^2 = 2 so r = 41.42%.
        let flows = [flow(dec!(-1000), 2021, 1, 1), flow(dec!(2000), 2023, 1, 1)];
        let rate = xirr(&flows);
        assert!((rate - dec!(41.42)).abs() < dec!(0.01), "got {}", rate);
    }

    #[test]
    fn losing_money_solves_to_a_negative_rate() {
        let flows = [flow(dec!(-1000), 2023, 1, 1), flow(dec!(900), 2024, 1, 1)];
        let rate = xirr(&flows);
        assert!((rate - dec!(-10)).abs() < dec!(0.01), "got {}", rate);
    }

    #[test]
    fn matches_the_spreadsheet_reference_case() {
        // The widely published spreadsheet XIRR example; documented result
        // is 37.3362535%.
        let flows = [
            flow(dec!(-10000), 2008, 1, 1),
            flow(dec!(2750), 2008, 3, 1),
            flow(dec!(4250), 2008, 10, 30),
            flow(dec!(3250), 2009, 2, 15),
            flow(dec!(2750), 2009, 4, 1),
        ];
        let rate = xirr(&flows);
        assert!((rate - dec!(37.3362535)).abs() < dec!(0.01), "got {}", rate);
    }

    #[test]
    fn one_sided_flows_return_zero_quietly() {
        assert_eq!(xirr(&[]), Decimal::ZERO);
        assert_eq!(xirr(&[flow(dec!(-1000), 2023, 1, 1)]), Decimal::ZERO);
        assert_eq!(
            xirr(&[flow(dec!(500), 2023, 1, 1), flow(dec!(700), 2024, 1, 1)]),
            Decimal::ZERO
        );
    }

    #[test]
    fn irregular_multi_flow_result_is_finite_and_sane() {
        let flows = [
            flow(dec!(-5000), 2022, 2, 14),
            flow(dec!(-3000), 2022, 9, 3),
            flow(dec!(1500), 2023, 1, 20),
            flow(dec!(-2000), 2023, 6, 11),
            flow(dec!(9500), 2024, 3, 5),
        ];
        let rate = xirr(&flows);
        assert!(rate > dec!(-100) && rate < dec!(100), "got {}", rate);
    }

    #[test]
    fn contribution_and_distribution_helpers_set_signs() {
        let c = CashFlow::contribution(dec!(100), date(2024, 1, 1));
        let d = CashFlow::distribution(dec!(100), date(2024, 1, 1));
        assert_eq!(c.amount, dec!(-100));
        assert_eq!(d.amount, dec!(100));
    }

    #[test]
    fn simple_return_formula() {
        // 12,000 current + 1,000 withdrawn against 10,000 put in: 30%.
        assert_eq!(
            simple_return(dec!(12000), dec!(1000), dec!(10000)),
            dec!(30)
        );
    }

    #[test]
    fn simple_return_without_contributions_is_zero() {
        assert_eq!(simple_return(dec!(500), dec!(0), Decimal::ZERO), Decimal::ZERO);
    }
}
