use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "plutus", version, about = "Track a personal stock portfolio")]
pub struct Cli {
    /// Path of the SQLite holdings database
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Seconds to wait for each price lookup
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show holdings and portfolio totals
    List,
    /// Add a holding after fetching its current quote
    Add {
        ticker: String,
        /// Average cost per share
        avg_cost: String,
        /// Number of shares owned
        shares: String,
    },
    /// Show price, gains and lots for one holding
    Show { id: i64 },
    /// Delete a holding by id
    Remove { id: i64 },
    /// Refresh live prices for every holding
    Refresh,
    /// Import holdings from a `ticker,avg_cost,shares` CSV file
    Import { path: String },
    /// Show each holding's share of the portfolio and its total gain
    Allocation,
}
