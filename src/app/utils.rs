use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    error::{PortfolioError, PortfolioResult},
    models::Holding,
};

pub const DEFAULT_TICKERS: [&str; 12] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "FB", "TSLA", "AVGO", "ARM", "GM", "GOOG", "NVDA", "TSM",
];

static SYMBOL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Z0-9.\-]{0,9}$").expect("symbol pattern is a valid regex")
});

/// Static set of symbols the input form accepts.
#[derive(Clone, Debug)]
pub struct SymbolAllowList {
    symbols: BTreeSet<String>,
}

impl Default for SymbolAllowList {
    fn default() -> Self {
        Self::with_extra(&[])
    }
}

impl SymbolAllowList {
    pub fn with_extra(extra: &[String]) -> Self {
        let symbols = DEFAULT_TICKERS
            .iter()
            .map(|s| s.to_string())
            .chain(extra.iter().map(|s| s.trim().to_uppercase()))
            .filter(|s| !s.is_empty())
            .collect();
        Self { symbols }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Normalizes `input` and checks it against the list.
    pub fn validate(&self, input: &str) -> PortfolioResult<String> {
        let symbol = input.trim().to_uppercase();

        if !SYMBOL_PATTERN.is_match(&symbol) {
            return Err(PortfolioError::InvalidInput(format!(
                "'{}' is not a ticker symbol",
                input
            )));
        }

        if !self.contains(&symbol) {
            return Err(PortfolioError::InvalidInput(format!(
                "Ticker {} is not valid.",
                symbol
            )));
        }

        Ok(symbol)
    }
}

pub fn parse_decimal(field: &str, field_name: &str) -> PortfolioResult<Decimal> {
    field.trim().parse::<Decimal>().map_err(|_| {
        PortfolioError::InvalidInput(format!("Failed to parse {} '{}'", field_name, field))
    })
}

/// Largest cost or share count accepted on input. Keeps every price times
/// shares product well inside the `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

pub fn validate_amount(value: Decimal, field_name: &str) -> PortfolioResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PortfolioError::InvalidInput(format!(
            "{} must not be negative, got {}",
            field_name, value
        )));
    }
    if value > MAX_AMOUNT {
        return Err(PortfolioError::InvalidInput(format!(
            "{} must not exceed {}, got {}",
            field_name, MAX_AMOUNT, value
        )));
    }
    Ok(value)
}

/// `$1,234.56`, with a leading minus for losses.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.abs().round_dp(2);
    let text = format!("{:.2}", rounded);
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, fraction)
}

pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

pub fn format_shares(shares: Decimal) -> String {
    format!("{:.1} shares", shares.round_dp(1))
}

/// Total gain as `+$x` / `-$x`.
pub fn format_change(holding: &Holding) -> String {
    let sign = if holding.is_profitable() { "+" } else { "-" };
    format!("{}{}", sign, format_currency(holding.total_gain_dollars().abs()))
}

/// Labelled lines for the single-holding view: price and day move first,
/// then the change and lot figures.
pub fn holding_details(holding: &Holding) -> Vec<(&'static str, String)> {
    vec![
        ("Price", format_currency(*holding.current_price())),
        (
            "Today",
            format!(
                "{} ({})",
                format_percent(holding.day_gain_percent()),
                format_currency(holding.day_gain_dollars())
            ),
        ),
        ("Day's Gain", format_currency(holding.day_gain_dollars())),
        ("Total Gain", format_change(holding)),
        ("Total Gain %", format_percent(holding.total_gain_percent())),
        ("Market Value", format_currency(holding.market_value())),
        ("Average Cost", format_currency(*holding.avg_cost_price())),
        ("Total Shares", format_shares(*holding.num_shares_owned())),
    ]
}
