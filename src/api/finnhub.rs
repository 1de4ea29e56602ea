use async_trait::async_trait;
use reqwest::Client;

use super::{
    base::PriceLookup,
    finnhub_dto::FinnhubQuoteDto,
    utils::{make_request, parse_response_object},
};
use crate::{error::QuoteError, models::PriceQuote};

pub const BASE_URL: &str = "https://finnhub.io/api/v1";

#[derive(Clone, Debug)]
pub struct FinnhubApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FinnhubApi {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(BASE_URL.to_string(), api_key)
    }

    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub async fn get_quote(&self, symbol: &str) -> Result<FinnhubQuoteDto, QuoteError> {
        let params = [("symbol", symbol), ("token", self.api_key.as_str())];
        let res = make_request(&self.client, &self.base_url, "quote", &params).await?;

        parse_response_object::<FinnhubQuoteDto>(res, &format!("Bad quote for symbol {}", symbol))
    }
}

#[async_trait]
impl PriceLookup for FinnhubApi {
    async fn fetch_quote(&self, ticker: &str) -> Result<PriceQuote, QuoteError> {
        let dto = self.get_quote(ticker).await?;
        tracing::debug!(ticker, price = %dto.current_price(), "fetched quote");
        Ok(dto.to_quote())
    }
}
