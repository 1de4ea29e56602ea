use anyhow::{Context, Result};
use tokio_stream::StreamExt;

use crate::{
    app::{
        Portfolio,
        utils::{
            format_change, format_currency, format_percent, format_shares, holding_details,
            parse_decimal,
        },
    },
    cli::Command,
    models::{RefreshEvent, RefreshReport, TickerOutcome},
};

pub struct App {
    portfolio: Portfolio,
}

impl App {
    pub fn new(portfolio: Portfolio) -> Self {
        Self { portfolio }
    }

    pub async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::List => {}
            Command::Add {
                ticker,
                avg_cost,
                shares,
            } => {
                let cost = parse_decimal(&avg_cost, "average cost")?;
                let shares = parse_decimal(&shares, "shares")?;
                let holding = self
                    .portfolio
                    .add_holding(&ticker, cost, shares)
                    .await
                    .with_context(|| format!("Failed to add {}", ticker))?;
                println!(
                    "Added {} ({}) at {}",
                    holding.ticker(),
                    format_shares(*holding.num_shares_owned()),
                    format_currency(*holding.current_price())
                );
            }
            Command::Show { id } => {
                let holding = self
                    .portfolio
                    .holding(id)
                    .with_context(|| format!("No holding with id {}", id))?;
                println!("{}", holding.ticker());
                for (label, value) in holding_details(holding) {
                    println!("  {:<14} {:>16}", label, value);
                }
                return Ok(());
            }
            Command::Remove { id } => {
                let removed = self.portfolio.remove_holding(id).await?;
                println!("Removed {}", removed.ticker());
            }
            Command::Refresh => {
                let mut events = self.portfolio.coordinator().event_stream();
                let progress = tokio::spawn(async move {
                    while let Some(event) = events.next().await {
                        match event {
                            Ok(RefreshEvent::Resolved {
                                ticker,
                                outcome,
                                remaining,
                                ..
                            }) => {
                                let status = match outcome {
                                    TickerOutcome::Updated(_) => "updated",
                                    TickerOutcome::Failed(_) => "failed",
                                    TickerOutcome::Cancelled => "cancelled",
                                };
                                println!("  {:<8} {:<9} ({} pending)", ticker, status, remaining);
                            }
                            Ok(RefreshEvent::Completed(_)) => break,
                            _ => {}
                        }
                    }
                });

                let result = self
                    .portfolio
                    .refresh_prices()
                    .await
                    .with_context(|| "Error updating prices");
                if result.is_err() {
                    progress.abort();
                }
                let _ = progress.await;
                print_report(&result?);
            }
            Command::Import { path } => {
                let path = shellexpand::tilde(&path);
                let imported = self
                    .portfolio
                    .import_holdings(&path)
                    .await
                    .with_context(|| format!("Error importing holdings from {}", path))?;
                println!("Imported {} holdings", imported);
            }
            Command::Allocation => {
                self.print_allocation();
                return Ok(());
            }
        }

        self.print_holdings();
        Ok(())
    }

    fn print_holdings(&self) {
        let holdings = self.portfolio.holdings();

        if holdings.is_empty() {
            println!("No holdings to display. Add one with `plutus add`.");
            return;
        }

        println!(
            "{:>4}  {:<8} {:>14} {:>12} {:>14} {:>14} {:>10} {:>14}",
            "Id", "Ticker", "Shares", "Price", "Value", "Total G/L", "G/L %", "Day G/L"
        );
        for holding in holdings {
            println!(
                "{:>4}  {:<8} {:>14} {:>12} {:>14} {:>14} {:>10} {:>14}",
                holding.id().map(|id| id.to_string()).unwrap_or_default(),
                holding.ticker(),
                format_shares(*holding.num_shares_owned()),
                format_currency(*holding.current_price()),
                format_currency(holding.market_value()),
                format_change(holding),
                format_percent(holding.total_gain_percent()),
                format_currency(holding.day_gain_dollars()),
            );
        }

        let totals = self.portfolio.totals();
        println!();
        println!("My Portfolio   {}", format_currency(*totals.total_market_value()));
        println!("Day's Gain:    {}", format_currency(*totals.total_day_gain()));
        println!("Total Gain:    {}", format_currency(*totals.total_gain()));
    }

    fn print_allocation(&self) {
        let slices = self.portfolio.allocation();
        let points = self.portfolio.gain_points();

        println!(
            "{:<8} {:>14} {:>9} {:>14} {:>10}",
            "Ticker", "Value", "Weight", "Total G/L", "G/L %"
        );
        for (slice, point) in slices.iter().zip(points.iter()) {
            println!(
                "{:<8} {:>14} {:>9} {:>14} {:>10}",
                slice.ticker(),
                format_currency(*slice.market_value()),
                format_percent(*slice.percent()),
                format_currency(*point.gain_dollars()),
                format_percent(*point.gain_percent()),
            );
        }
    }
}

fn print_report(report: &RefreshReport) {
    println!(
        "Updated {} of {} holdings",
        report.updated().len(),
        report.resolved_count()
    );
    for (ticker, err) in report.failed() {
        println!("  {} not updated: {}", ticker, err);
    }
}
