use rust_decimal::Decimal;

use crate::models::{AllocationSlice, GainPoint, Holding, PortfolioTotals, holding::percent_of};

/// Sums clamp to the `Decimal` range rather than overflow.
pub fn portfolio_totals(holdings: &[Holding]) -> PortfolioTotals {
    let (market_value, gain, day_gain) = holdings.iter().fold(
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        |(market_value, gain, day_gain), holding| {
            (
                market_value.saturating_add(holding.market_value()),
                gain.saturating_add(holding.total_gain_dollars()),
                day_gain.saturating_add(holding.day_gain_dollars()),
            )
        },
    );

    PortfolioTotals::new(market_value, gain, day_gain)
}

/// Share of the total market value held in each position. Every slice is 0%
/// when the portfolio is worth nothing.
pub fn allocation(holdings: &[Holding]) -> Vec<AllocationSlice> {
    let total = holdings
        .iter()
        .fold(Decimal::ZERO, |sum, holding| sum.saturating_add(holding.market_value()));

    holdings
        .iter()
        .map(|holding| {
            let market_value = holding.market_value();
            let percent = percent_of(market_value, total);
            AllocationSlice::new(holding.ticker().clone(), market_value, percent)
        })
        .collect()
}

pub fn gain_points(holdings: &[Holding]) -> Vec<GainPoint> {
    holdings
        .iter()
        .map(|holding| {
            GainPoint::new(
                holding.ticker().clone(),
                holding.total_gain_dollars(),
                holding.total_gain_percent(),
            )
        })
        .collect()
}
