#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        app::utils::{
            MAX_AMOUNT, SymbolAllowList, format_change, format_currency, format_percent,
            format_shares, holding_details, parse_decimal, validate_amount,
        },
        error::PortfolioError,
        test::holding,
    };

    #[test]
    fn allow_list_accepts_known_symbols() {
        let allow_list = SymbolAllowList::default();

        assert_eq!(allow_list.validate("TSLA").unwrap(), "TSLA");
        assert_eq!(allow_list.validate(" nvda ").unwrap(), "NVDA");
    }

    #[test]
    fn allow_list_rejects_unknown_and_malformed_symbols() {
        let allow_list = SymbolAllowList::default();

        assert!(matches!(
            allow_list.validate("IBM"),
            Err(PortfolioError::InvalidInput(_))
        ));
        assert!(matches!(
            allow_list.validate(""),
            Err(PortfolioError::InvalidInput(_))
        ));
        assert!(matches!(
            allow_list.validate("AAPL; DROP"),
            Err(PortfolioError::InvalidInput(_))
        ));
    }

    #[test]
    fn allow_list_takes_extra_symbols() {
        let allow_list = SymbolAllowList::with_extra(&[String::from("ibm"), String::from(" ")]);

        assert!(allow_list.contains("IBM"));
        assert!(allow_list.contains("AAPL"));
        assert!(!allow_list.contains(""));
    }

    #[test]
    fn parse_and_validate_numbers() {
        assert_eq!(parse_decimal(" 12.50 ", "cost").unwrap(), dec!(12.5));
        assert!(parse_decimal("twelve", "cost").is_err());
        assert_eq!(validate_amount(dec!(0), "shares").unwrap(), dec!(0));
        assert!(validate_amount(dec!(-1), "shares").is_err());
        assert_eq!(validate_amount(MAX_AMOUNT, "shares").unwrap(), MAX_AMOUNT);
        assert!(matches!(
            validate_amount(MAX_AMOUNT + dec!(0.01), "shares"),
            Err(PortfolioError::InvalidInput(_))
        ));
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(999.999)), "$1,000.00");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(-2500)), "-$2,500.00");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn percent_and_share_formatting() {
        assert_eq!(format_percent(dec!(50)), "50.00%");
        assert_eq!(format_percent(dec!(-12.345)), "-12.34%");
        assert_eq!(format_shares(dec!(12.5)), "12.5 shares");
        assert_eq!(format_shares(dec!(3)), "3.0 shares");
    }

    #[test]
    fn change_text_is_signed() {
        let winner = holding("TSLA", dec!(100), dec!(50), dec!(40), dec!(150));
        let loser = holding("ARM", dec!(80), dec!(10), dec!(70), dec!(60));

        assert_eq!(format_change(&winner), "+$2,500.00");
        assert_eq!(format_change(&loser), "-$200.00");
    }

    #[test]
    fn holding_details_lines() {
        let tsla = holding("TSLA", dec!(100), dec!(50), dec!(40), dec!(150));

        let details = holding_details(&tsla);
        let lookup = |label: &str| {
            details
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, value)| value.as_str())
        };

        assert_eq!(lookup("Price"), Some("$150.00"));
        assert_eq!(lookup("Today"), Some("110.00% ($5,500.00)"));
        assert_eq!(lookup("Day's Gain"), Some("$5,500.00"));
        assert_eq!(lookup("Total Gain"), Some("+$2,500.00"));
        assert_eq!(lookup("Total Gain %"), Some("50.00%"));
        assert_eq!(lookup("Market Value"), Some("$7,500.00"));
        assert_eq!(lookup("Average Cost"), Some("$100.00"));
        assert_eq!(lookup("Total Shares"), Some("50.0 shares"));
    }
}
