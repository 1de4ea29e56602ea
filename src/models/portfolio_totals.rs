use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Clone, Debug, Default, Eq, Getters, PartialEq, Serialize, new)]
pub struct PortfolioTotals {
    total_market_value: Decimal,
    total_gain: Decimal,
    total_day_gain: Decimal,
}

/// Pie chart slice: one holding's share of the total market value.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct AllocationSlice {
    ticker: String,
    market_value: Decimal,
    percent: Decimal,
}

/// Bubble chart point: total gain in dollars against total gain in percent.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct GainPoint {
    ticker: String,
    gain_dollars: Decimal,
    gain_percent: Decimal,
}
