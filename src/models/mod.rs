pub mod holding;
pub mod portfolio_totals;
pub mod quote;
pub mod refresh;

pub use holding::Holding;
pub use portfolio_totals::{AllocationSlice, GainPoint, PortfolioTotals};
pub use quote::PriceQuote;
pub use refresh::{RefreshEvent, RefreshPhase, RefreshReport, RefreshStatus, TickerOutcome};
