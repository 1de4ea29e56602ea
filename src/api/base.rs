use async_trait::async_trait;

use crate::{error::QuoteError, models::PriceQuote};

/// External price lookup service: one network round trip per call, no retry
/// and no caching.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn fetch_quote(&self, ticker: &str) -> Result<PriceQuote, QuoteError>;
}
