mod app_utils;
mod calc;

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tempfile::TempDir;
use tokio::sync::{Barrier, Semaphore};

use crate::{
    api::PriceLookup,
    db::{SqliteHoldingsRepository, init::create_holdings},
    error::QuoteError,
    models::{Holding, PriceQuote},
};

pub fn holding(ticker: &str, cost: Decimal, shares: Decimal, open: Decimal, price: Decimal) -> Holding {
    Holding::new(ticker.to_string(), cost, shares, open, price)
}

/// SQLite repository in a temporary directory that lives as long as the
/// returned guard.
pub async fn open_repository() -> (TempDir, SqliteHoldingsRepository) {
    let dir = tempfile::tempdir().unwrap();
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("portfolio.db"))
        .create_if_missing(true);
    let connection = SqlitePool::connect_with(options).await.unwrap();
    create_holdings(&connection).await.unwrap();

    (dir, SqliteHoldingsRepository::new(connection))
}

/// Lookup fake answering from a fixed table. Unknown tickers fail with a
/// server error.
#[derive(Default)]
pub struct ScriptedLookup {
    responses: HashMap<String, Result<PriceQuote, QuoteError>>,
    gated: HashMap<String, Arc<Semaphore>>,
    barrier: Option<Arc<Barrier>>,
    delay: Option<Duration>,
    panics: Vec<String>,
    calls: AtomicUsize,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quote(mut self, ticker: &str, current: Decimal, open: Decimal) -> Self {
        self.responses
            .insert(ticker.to_string(), Ok(PriceQuote::new(current, open)));
        self
    }

    pub fn failure(mut self, ticker: &str, err: QuoteError) -> Self {
        self.responses.insert(ticker.to_string(), Err(err));
        self
    }

    /// The lookup for `ticker` blocks until the semaphore gets a permit.
    pub fn gate(mut self, ticker: &str, gate: Arc<Semaphore>) -> Self {
        self.gated.insert(ticker.to_string(), gate);
        self
    }

    /// Every lookup waits on the barrier, so all of them complete together.
    pub fn barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn panic_on(mut self, ticker: &str) -> Self {
        self.panics.push(ticker.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceLookup for ScriptedLookup {
    async fn fetch_quote(&self, ticker: &str) -> Result<PriceQuote, QuoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = self.gated.get(ticker) {
            let _permit = gate.acquire().await;
        }
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.panics.iter().any(|t| t == ticker) {
            panic!("lookup for {} blew up", ticker);
        }

        self.responses
            .get(ticker)
            .cloned()
            .unwrap_or(Err(QuoteError::Server(reqwest::StatusCode::NOT_FOUND)))
    }
}
