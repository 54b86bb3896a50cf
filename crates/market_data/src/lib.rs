pub mod remote;
pub mod services;
pub mod traits;

pub use remote::FinnhubClient;
pub use services::{QuoteIngestor, QuoteSimulator};
pub use traits::{MarketDataError, QuoteProvider};
