use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use plutus::{
    api::FinnhubApi,
    app::{App, Portfolio, utils::SymbolAllowList},
    cli::{Cli, Command},
    config::Config,
    db::{SqliteHoldingsRepository, init::create_holdings},
    logging::init_tracing,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.db_path, cli.timeout_secs);

    if let Some(parent) = Path::new(config.db_path()).parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let db_connect_options = SqliteConnectOptions::new()
        .filename(config.db_path())
        .create_if_missing(true);
    let connection = SqlitePool::connect_with(db_connect_options)
        .await
        .with_context(|| format!("Failed to open database {}", config.db_path()))?;
    create_holdings(&connection).await?;

    let repository = Arc::new(SqliteHoldingsRepository::new(connection));
    let lookup = Arc::new(FinnhubApi::with_base_url(
        config.base_url().clone(),
        config.api_key().clone(),
    ));

    let mut portfolio = Portfolio::new(repository, lookup, *config.lookup_timeout())
        .with_allow_list(SymbolAllowList::with_extra(config.extra_tickers()));
    portfolio.load().await?;

    let mut app = App::new(portfolio);
    app.run(cli.command.unwrap_or(Command::List)).await
}
