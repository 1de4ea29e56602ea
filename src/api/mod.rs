pub mod base;
pub mod finnhub;
pub mod finnhub_dto;
pub mod utils;

pub use base::PriceLookup;
pub use finnhub::FinnhubApi;
