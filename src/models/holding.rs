use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PriceQuote;

/// A single tracked equity position.
///
/// Only the four stored prices/quantities live on the struct. Every gain and
/// value figure is computed on read so nothing derived can go stale.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct Holding {
    #[new(default)]
    id: Option<i64>,
    ticker: String,
    avg_cost_price: Decimal,
    num_shares_owned: Decimal,
    day_open_price: Decimal,
    current_price: Decimal,
}

impl Holding {
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Overwrites the live prices with a freshly fetched quote.
    pub fn apply_quote(&mut self, quote: &PriceQuote) {
        self.current_price = *quote.current_price();
        self.day_open_price = *quote.open_price();
    }

    pub fn day_gain_dollars(&self) -> Decimal {
        self.current_price
            .saturating_sub(self.day_open_price)
            .saturating_mul(self.num_shares_owned)
    }

    /// Day move relative to the cost basis, zero for a zero-cost position.
    pub fn day_gain_percent(&self) -> Decimal {
        percent_of(
            self.current_price.saturating_sub(self.day_open_price),
            self.avg_cost_price,
        )
    }

    pub fn total_gain_dollars(&self) -> Decimal {
        self.current_price
            .saturating_sub(self.avg_cost_price)
            .saturating_mul(self.num_shares_owned)
    }

    pub fn total_gain_percent(&self) -> Decimal {
        percent_of(
            self.current_price.saturating_sub(self.avg_cost_price),
            self.avg_cost_price,
        )
    }

    pub fn market_value(&self) -> Decimal {
        self.current_price.saturating_mul(self.num_shares_owned)
    }

    pub fn is_profitable(&self) -> bool {
        self.current_price >= self.avg_cost_price
    }

    /// True when every per-share price times the share count fits in a
    /// `Decimal` without saturating.
    pub fn is_representable(&self) -> bool {
        [self.avg_cost_price, self.day_open_price, self.current_price]
            .iter()
            .all(|price| price.checked_mul(self.num_shares_owned).is_some())
    }
}

/// `part / whole * 100`. Zero when `whole` is zero; clamps to the `Decimal`
/// range instead of overflowing.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }

    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None if part.is_sign_negative() != whole.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}
