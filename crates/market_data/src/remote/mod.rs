pub mod finnhub_client;
pub mod quote_response;

pub use finnhub_client::{FinnhubClient, provider_symbol};
pub use quote_response::FinnhubQuoteResponse;
