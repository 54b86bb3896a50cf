use async_trait::async_trait;
use common::models::Quote;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("Quote request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Quote provider answered HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No provider symbol for pair {0}")]
    UnknownPair(String),

    #[error("Quote for {0} has a non-positive or non-finite price")]
    InvalidQuote(String),
}

impl From<reqwest::Error> for MarketDataError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the provider token.
        Self::Http(err.without_url())
    }
}

/// A live source of quotes, one instrument per call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quote(&self, pair: &str) -> Result<Quote, MarketDataError>;
}
