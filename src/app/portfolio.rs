use std::{sync::Arc, time::Duration};

use csv::Reader;
use rust_decimal::Decimal;

use crate::{
    api::PriceLookup,
    app::{
        calc,
        utils::{SymbolAllowList, parse_decimal, validate_amount},
    },
    db::HoldingsRepository,
    error::{PortfolioError, PortfolioResult},
    models::{AllocationSlice, GainPoint, Holding, PortfolioTotals, RefreshReport},
    services::RefreshCoordinator,
};

pub struct Portfolio {
    holdings: Vec<Holding>,
    repository: Arc<dyn HoldingsRepository>,
    coordinator: RefreshCoordinator,
    allow_list: SymbolAllowList,
}

impl Portfolio {
    pub fn new(
        repository: Arc<dyn HoldingsRepository>,
        lookup: Arc<dyn PriceLookup>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            holdings: Vec::new(),
            repository,
            coordinator: RefreshCoordinator::new(lookup, lookup_timeout),
            allow_list: SymbolAllowList::default(),
        }
    }

    pub fn with_allow_list(mut self, allow_list: SymbolAllowList) -> Self {
        self.allow_list = allow_list;
        self
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn holding(&self, id: i64) -> Option<&Holding> {
        self.holdings.iter().find(|holding| *holding.id() == Some(id))
    }

    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    pub async fn load(&mut self) -> PortfolioResult<()> {
        self.holdings = self.repository.list_all().await?;
        tracing::debug!(count = self.holdings.len(), "loaded holdings");
        Ok(())
    }

    /// Validates the entry, fetches an initial quote and persists the holding.
    /// Nothing is created when the quote cannot be fetched or the position
    /// cannot be valued.
    pub async fn add_holding(
        &mut self,
        ticker: &str,
        avg_cost_price: Decimal,
        num_shares_owned: Decimal,
    ) -> PortfolioResult<&Holding> {
        let ticker = self.allow_list.validate(ticker)?;
        let avg_cost_price = validate_amount(avg_cost_price, "Average cost")?;
        let num_shares_owned = validate_amount(num_shares_owned, "Number of shares")?;

        let quote = self
            .coordinator
            .lookup()
            .fetch_quote(&ticker)
            .await
            .map_err(|source| PortfolioError::Quote {
                ticker: ticker.clone(),
                source,
            })?;

        let holding = Holding::new(
            ticker,
            avg_cost_price,
            num_shares_owned,
            *quote.open_price(),
            *quote.current_price(),
        );
        if !holding.is_representable() {
            return Err(PortfolioError::InvalidInput(format!(
                "Position in {} is too large to value",
                holding.ticker()
            )));
        }
        let holding = self.repository.insert(holding).await?;
        tracing::info!(ticker = %holding.ticker(), id = ?holding.id(), "added holding");

        self.holdings.push(holding);
        Ok(&self.holdings[self.holdings.len() - 1])
    }

    pub async fn remove_holding(&mut self, id: i64) -> PortfolioResult<Holding> {
        let index = self
            .holdings
            .iter()
            .position(|holding| *holding.id() == Some(id))
            .ok_or_else(|| PortfolioError::InvalidInput(format!("No holding with id {}", id)))?;

        self.repository.delete(&self.holdings[index]).await?;
        let removed = self.holdings.remove(index);
        tracing::info!(ticker = %removed.ticker(), id, "removed holding");

        Ok(removed)
    }

    /// Runs one refresh cycle and commits the new prices.
    ///
    /// A failed commit is returned as an error but the refreshed prices stay in
    /// memory.
    pub async fn refresh_prices(&mut self) -> PortfolioResult<RefreshReport> {
        let report = self.coordinator.refresh(&mut self.holdings).await?;

        if !report.updated().is_empty() {
            self.repository.save(&self.holdings).await.inspect_err(|e| {
                tracing::error!(cycle = *report.cycle(), error = %e, "failed to save refreshed prices");
            })?;
        }

        Ok(report)
    }

    /// Imports `ticker,avg_cost,shares` rows. Rows that fail validation or
    /// whose quote cannot be fetched are skipped.
    pub async fn import_holdings(&mut self, path: &str) -> PortfolioResult<usize> {
        let mut reader = Reader::from_path(path)?;
        let mut imported = 0;

        for (row_idx, record) in reader.records().enumerate() {
            let rec = record?;

            if rec.len() < 3 {
                tracing::warn!(
                    row = row_idx + 1,
                    columns = rec.len(),
                    "skipping row: expected 3 columns"
                );
                continue;
            }

            let parsed = parse_decimal(&rec[1], "average cost")
                .and_then(|cost| Ok((cost, parse_decimal(&rec[2], "shares")?)));
            let (cost, shares) = match parsed {
                Ok(values) => values,
                Err(err) => {
                    tracing::warn!(row = row_idx + 1, error = %err, "skipping row");
                    continue;
                }
            };

            match self.add_holding(&rec[0], cost, shares).await {
                Ok(_) => imported += 1,
                Err(err @ (PortfolioError::InvalidInput(_) | PortfolioError::Quote { .. })) => {
                    tracing::warn!(row = row_idx + 1, error = %err, "skipping row");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(imported)
    }

    pub fn totals(&self) -> PortfolioTotals {
        calc::portfolio_totals(&self.holdings)
    }

    pub fn allocation(&self) -> Vec<AllocationSlice> {
        calc::allocation(&self.holdings)
    }

    pub fn gain_points(&self) -> Vec<GainPoint> {
        calc::gain_points(&self.holdings)
    }
}
