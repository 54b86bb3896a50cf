use chrono::Local;
use common::models::SignalRecord;
use common::{AppConfig, DataMode};
use market_data::{MarketDataError, QuoteIngestor};
use reqwest::StatusCode;
use serde::Serialize;
use strategy::SignalClassifier;

use crate::envelope::{Envelope, Request, Response};

#[derive(Debug, Serialize)]
struct SignalsBody {
    signals: Vec<SignalRecord>,
    mode: DataMode,
}

/// `GET` endpoint: one signal per pair that could be quoted.
pub struct QuotesEndpoint {
    ingestor: QuoteIngestor,
    envelope: Envelope,
}

impl QuotesEndpoint {
    pub fn new(ingestor: QuoteIngestor) -> Self {
        Self {
            ingestor,
            envelope: Envelope::get(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, MarketDataError> {
        Ok(Self::new(QuoteIngestor::from_config(config)?))
    }

    pub fn mode(&self) -> DataMode {
        self.ingestor.mode()
    }

    /// Never fails on provider errors; the batch may come back empty.
    pub async fn handle(&self, request: &Request) -> Response {
        if let Some(response) = self.envelope.guard(request) {
            return response;
        }

        let snapshots = self.ingestor.collect().await;
        let body = SignalsBody {
            signals: SignalClassifier::classify_all(&snapshots, Local::now()),
            mode: self.ingestor.mode(),
        };

        self.envelope.json(StatusCode::OK, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::models::Quote;
    use market_data::QuoteProvider;
    use mockall::mock;
    use reqwest::Method;
    use serde_json::Value;

    mock! {
        Provider {}

        #[async_trait]
        impl QuoteProvider for Provider {
            async fn fetch_quote(&self, pair: &str) -> Result<Quote, MarketDataError>;
        }
    }

    fn pairs(names: &[&str]) -> Vec<String> {
        names.iter().map(|p| p.to_string()).collect()
    }

    fn eur_usd_quote() -> Quote {
        Quote {
            pair: "EUR/USD".to_string(),
            current_price: 1.105,
            previous_close: 1.1,
            high_price: 1.108,
            low_price: 1.102,
        }
    }

    fn get() -> Request {
        Request::new(Method::GET)
    }

    #[tokio::test]
    async fn test_simulated_mode_still_serves_signals() {
        let endpoint = QuotesEndpoint::new(QuoteIngestor::simulated(pairs(&[
            "EUR/USD", "GBP/USD", "USD/JPY",
        ])));
        let response = endpoint.handle(&get()).await;

        assert_eq!(response.status, StatusCode::OK);
        let body = response.body_json().unwrap();
        assert_eq!(body["mode"], "simulated");

        let signals = body["signals"].as_array().unwrap();
        assert_eq!(signals.len(), 3);
        for signal in signals {
            let price = signal["price"].as_f64().unwrap();
            assert!((1.0..=1.5).contains(&price));
            let confidence = signal["confidence"].as_u64().unwrap();
            assert!((60..=95).contains(&confidence));
            assert_eq!(signal["status"], "active");
            assert!(signal.get("reasoning").is_none());
        }
    }

    #[tokio::test]
    async fn test_live_mode_signal_from_quote() {
        let mut provider = MockProvider::new();
        provider
            .expect_fetch_quote()
            .times(1)
            .returning(|_| Ok(eur_usd_quote()));

        let endpoint = QuotesEndpoint::new(QuoteIngestor::live(pairs(&["EUR/USD"]), provider));
        let body = endpoint.handle(&get()).await.body_json().unwrap();

        assert_eq!(body["mode"], "live");
        let signal = &body["signals"][0];
        assert_eq!(signal["pair"], "EUR/USD");
        assert_eq!(signal["type"], "BUY");
        assert_eq!(signal["confidence"], 74);
        assert_eq!(signal["volatility"], "high");
        assert_eq!(signal["timeframe"], "2m");
        assert_eq!(signal["price"], 1.105);
        assert_eq!(signal["target"], 1.10721);
        assert_eq!(signal["change_percent"], 0.45);
        assert!(signal["id"].as_str().unwrap().starts_with("EURUSD-"));
    }

    #[tokio::test]
    async fn test_provider_failures_give_partial_batch() {
        let mut provider = MockProvider::new();
        provider.expect_fetch_quote().times(3).returning(|pair| {
            if pair == "GBP/USD" {
                let mut quote = eur_usd_quote();
                quote.pair = pair.to_string();
                Ok(quote)
            } else {
                Err(MarketDataError::Status {
                    status: 403,
                    body: "You don't have access to this resource.".to_string(),
                })
            }
        });

        let endpoint = QuotesEndpoint::new(QuoteIngestor::live(
            pairs(&["EUR/USD", "GBP/USD", "USD/JPY"]),
            provider,
        ));
        let response = endpoint.handle(&get()).await;

        assert_eq!(response.status, StatusCode::OK);
        let body = response.body_json().unwrap();
        let pairs: Vec<&str> = body["signals"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|s| s["pair"].as_str())
            .collect();
        assert_eq!(pairs, vec!["GBP/USD"]);
    }

    #[tokio::test]
    async fn test_all_failures_give_empty_list() {
        let mut provider = MockProvider::new();
        provider
            .expect_fetch_quote()
            .returning(|pair| Err(MarketDataError::InvalidQuote(pair.to_string())));

        let endpoint = QuotesEndpoint::new(QuoteIngestor::live(pairs(&["EUR/USD"]), provider));
        let response = endpoint.handle(&get()).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body_json().unwrap()["signals"],
            Value::Array(Vec::new())
        );
    }

    #[tokio::test]
    async fn test_options_and_wrong_verbs_skip_the_provider() {
        let mut provider = MockProvider::new();
        provider.expect_fetch_quote().never();
        let endpoint = QuotesEndpoint::new(QuoteIngestor::live(pairs(&["EUR/USD"]), provider));

        let preflight = endpoint.handle(&Request::new(Method::OPTIONS)).await;
        assert_eq!(preflight.status, StatusCode::OK);
        assert!(preflight.body.is_empty());

        let post = endpoint
            .handle(&Request::new(Method::POST).with_body("{}"))
            .await;
        assert_eq!(post.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(post.body_json().unwrap()["error"], "Method not allowed");
    }
}
