use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transient live price pair returned by a lookup. Never persisted.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct PriceQuote {
    current_price: Decimal,
    open_price: Decimal,
}
