#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        app::calc::{allocation, gain_points, portfolio_totals},
        models::Holding,
        test::holding,
    };

    fn set_sample_data() -> Vec<Holding> {
        vec![
            holding("TSLA", dec!(100), dec!(50), dec!(40), dec!(150)),
            holding("AAPL", dec!(150), dec!(12.5), dec!(195), dec!(200)),
            holding("GM", dec!(45), dec!(100), dec!(31), dec!(30.5)),
            holding("FB", dec!(0), dec!(4), dec!(300), dec!(310)),
        ]
    }

    #[test]
    fn totals_match_sum_of_holdings() {
        let holdings = set_sample_data();
        let totals = portfolio_totals(&holdings);

        let value: Decimal = holdings.iter().map(|h| h.market_value()).sum();
        let gain: Decimal = holdings.iter().map(|h| h.total_gain_dollars()).sum();
        let day_gain: Decimal = holdings.iter().map(|h| h.day_gain_dollars()).sum();

        assert_eq!(*totals.total_market_value(), value);
        assert_eq!(*totals.total_gain(), gain);
        assert_eq!(*totals.total_day_gain(), day_gain);
        assert_eq!(*totals.total_market_value(), dec!(14290));
    }

    #[test]
    fn totals_are_order_independent() {
        let holdings = set_sample_data();
        let expected = portfolio_totals(&holdings);

        let mut reversed = holdings.clone();
        reversed.reverse();
        assert_eq!(portfolio_totals(&reversed), expected);

        let mut rotated = holdings.clone();
        rotated.rotate_left(2);
        assert_eq!(portfolio_totals(&rotated), expected);

        let mut swapped = holdings;
        swapped.swap(0, 3);
        assert_eq!(portfolio_totals(&swapped), expected);
    }

    #[test]
    fn two_holdings_total_market_value() {
        let holdings = vec![
            holding("TSLA", dec!(100), dec!(50), dec!(40), dec!(150)),
            holding("MSFT", dec!(200), dec!(10), dec!(240), dec!(250)),
        ];

        assert_eq!(*portfolio_totals(&holdings).total_market_value(), dec!(10000));
    }

    #[test]
    fn empty_portfolio_totals_are_zero() {
        let totals = portfolio_totals(&[]);

        assert_eq!(*totals.total_market_value(), Decimal::ZERO);
        assert_eq!(*totals.total_gain(), Decimal::ZERO);
        assert_eq!(*totals.total_day_gain(), Decimal::ZERO);
    }

    #[test]
    fn allocation_splits_market_value() {
        let holdings = vec![
            holding("TSLA", dec!(100), dec!(50), dec!(40), dec!(150)),
            holding("MSFT", dec!(200), dec!(10), dec!(240), dec!(250)),
        ];
        let slices = allocation(&holdings);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].ticker(), "TSLA");
        assert_eq!(*slices[0].percent(), dec!(75));
        assert_eq!(*slices[1].market_value(), dec!(2500));
        assert_eq!(*slices[1].percent(), dec!(25));
    }

    #[test]
    fn allocation_of_worthless_portfolio_is_zero() {
        let holdings = vec![holding("GM", dec!(10), dec!(0), dec!(5), dec!(5))];

        assert_eq!(*allocation(&holdings)[0].percent(), Decimal::ZERO);
    }

    #[test]
    fn gain_points_follow_holdings() {
        let holdings = set_sample_data();
        let points = gain_points(&holdings);

        assert_eq!(points.len(), holdings.len());
        assert_eq!(points[0].ticker(), "TSLA");
        assert_eq!(*points[0].gain_dollars(), dec!(2500));
        assert_eq!(*points[0].gain_percent(), dec!(50));
        assert_eq!(*points[3].gain_percent(), Decimal::ZERO);
    }

    #[test]
    fn totals_clamp_instead_of_overflowing() {
        let holdings = vec![
            holding("AAPL", dec!(1), Decimal::MAX, dec!(1), dec!(2)),
            holding("MSFT", dec!(1), Decimal::MAX, dec!(1), dec!(2)),
        ];

        let totals = portfolio_totals(&holdings);

        assert_eq!(*totals.total_market_value(), Decimal::MAX);
        assert_eq!(*totals.total_gain(), Decimal::MAX);
        assert_eq!(*totals.total_day_gain(), Decimal::MAX);

        let slices = allocation(&holdings);
        assert_eq!(*slices[0].percent(), dec!(100));
        assert_eq!(*slices[1].percent(), dec!(100));
    }
}
