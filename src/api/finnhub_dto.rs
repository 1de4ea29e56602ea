use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::PriceQuote;

/// Body of `GET /quote`. Only the current and open prices are read; the
/// remaining Finnhub fields (`d`, `dp`, `h`, `l`, `pc`, `t`) are ignored.
#[derive(Debug, Deserialize, Getters)]
pub struct FinnhubQuoteDto {
    #[serde(rename = "c")]
    current_price: Decimal,
    #[serde(rename = "o")]
    open_price: Decimal,
}

impl FinnhubQuoteDto {
    pub fn to_quote(&self) -> PriceQuote {
        PriceQuote::new(self.current_price, self.open_price)
    }
}
