use std::time::Duration;

use anyhow::{Context, Result};
use derive_getters::Getters;

use crate::api::finnhub::BASE_URL;

pub const DEFAULT_DB_PATH: &str = "~/.plutus/portfolio.db";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, Getters)]
pub struct Config {
    api_key: String,
    base_url: String,
    db_path: String,
    lookup_timeout: Duration,
    extra_tickers: Vec<String>,
}

impl Config {
    /// Reads `FINNHUB_API_KEY`, `FINNHUB_BASE_URL`, `PLUTUS_DB_PATH`,
    /// `PLUTUS_LOOKUP_TIMEOUT_SECS` and `PLUTUS_EXTRA_TICKERS`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = var("FINNHUB_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .with_context(|| "Missing FINNHUB_API_KEY in environment")?;

        let base_url = var("FINNHUB_BASE_URL").unwrap_or_else(|| BASE_URL.to_string());
        let db_path = var("PLUTUS_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let timeout_secs = match var("PLUTUS_LOOKUP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid PLUTUS_LOOKUP_TIMEOUT_SECS '{}'", raw))?,
            None => DEFAULT_LOOKUP_TIMEOUT_SECS,
        };

        let extra_tickers = var("PLUTUS_EXTRA_TICKERS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_uppercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            api_key,
            base_url,
            db_path: expand_path(&db_path),
            lookup_timeout: Duration::from_secs(timeout_secs),
            extra_tickers,
        })
    }

    pub fn with_overrides(mut self, db_path: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(db_path) = db_path {
            self.db_path = expand_path(&db_path);
        }
        if let Some(secs) = timeout_secs {
            self.lookup_timeout = Duration::from_secs(secs);
        }
        self
    }
}

fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}
