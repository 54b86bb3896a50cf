use async_trait::async_trait;
use common::FinnhubSettings;
use common::models::Quote;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::remote::quote_response::FinnhubQuoteResponse;
use crate::traits::{MarketDataError, QuoteProvider};

/// Maps `EUR/USD` to Finnhub's `OANDA:EUR_USD`.
pub fn provider_symbol(pair: &str) -> Option<String> {
    let (base, quote) = pair.split_once('/')?;
    let is_code = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic());

    if is_code(base) && is_code(quote) {
        Some(format!(
            "OANDA:{}_{}",
            base.to_ascii_uppercase(),
            quote.to_ascii_uppercase()
        ))
    } else {
        None
    }
}

#[derive(Clone)]
pub struct FinnhubClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FinnhubClient {
    pub fn new(settings: &FinnhubSettings) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .user_agent("fx_signals/0.1.0")
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl QuoteProvider for FinnhubClient {
    async fn fetch_quote(&self, pair: &str) -> Result<Quote, MarketDataError> {
        let symbol =
            provider_symbol(pair).ok_or_else(|| MarketDataError::UnknownPair(pair.to_string()))?;
        let url = format!("{}/quote", self.base_url);

        debug!("Requesting quote for {} ({})", pair, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol.as_str()), ("token", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<FinnhubQuoteResponse>().await?.to_quote(pair))
    }
}
