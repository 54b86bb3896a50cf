use common::models::{PriceSnapshot, Quote};
use common::{AppConfig, DataMode};
use tracing::{debug, info, warn};

use crate::remote::FinnhubClient;
use crate::services::simulator::QuoteSimulator;
use crate::traits::{MarketDataError, QuoteProvider};

pub enum QuoteSource {
    Live(Box<dyn QuoteProvider>),
    Simulated(QuoteSimulator),
}

/// Produces one snapshot per tracked pair, in configuration order.
///
/// Live fetches run one pair at a time. A pair whose fetch fails, or whose
/// quote carries a non-positive price, is left out of the batch; the rest
/// of the batch is unaffected. No retries.
pub struct QuoteIngestor {
    pairs: Vec<String>,
    source: QuoteSource,
}

impl QuoteIngestor {
    pub fn new(pairs: Vec<String>, source: QuoteSource) -> Self {
        Self { pairs, source }
    }

    pub fn live<P: QuoteProvider + 'static>(pairs: Vec<String>, provider: P) -> Self {
        Self::new(pairs, QuoteSource::Live(Box::new(provider)))
    }

    pub fn simulated(pairs: Vec<String>) -> Self {
        Self::new(pairs, QuoteSource::Simulated(QuoteSimulator::new()))
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, MarketDataError> {
        match &config.finnhub {
            Some(settings) => Ok(Self::live(
                config.pairs.clone(),
                FinnhubClient::new(settings)?,
            )),
            None => Ok(Self::simulated(config.pairs.clone())),
        }
    }

    pub fn mode(&self) -> DataMode {
        match self.source {
            QuoteSource::Live(_) => DataMode::Live,
            QuoteSource::Simulated(_) => DataMode::Simulated,
        }
    }

    pub fn pairs(&self) -> &[String] {
        &self.pairs
    }

    pub async fn collect(&self) -> Vec<PriceSnapshot> {
        let snapshots = match &self.source {
            QuoteSource::Live(provider) => self.collect_live(provider.as_ref()).await,
            QuoteSource::Simulated(simulator) => self.collect_simulated(simulator),
        };

        info!(
            "Collected {}/{} {:?} snapshots",
            snapshots.len(),
            self.pairs.len(),
            self.mode()
        );
        snapshots
    }

    async fn collect_live(&self, provider: &dyn QuoteProvider) -> Vec<PriceSnapshot> {
        let mut snapshots = Vec::with_capacity(self.pairs.len());

        for pair in &self.pairs {
            match Self::fetch_valid(provider, pair).await {
                Ok(quote) => {
                    debug!("Quote {}: {:?}", pair, quote);
                    snapshots.push(quote.to_snapshot());
                }
                Err(e) => warn!("Skipping {}: {}", pair, e),
            }
        }

        snapshots
    }

    /// The only place a provider's quote is checked before classification.
    async fn fetch_valid(
        provider: &dyn QuoteProvider,
        pair: &str,
    ) -> Result<Quote, MarketDataError> {
        let quote = provider.fetch_quote(pair).await?;
        if quote.is_valid() {
            Ok(quote)
        } else {
            Err(MarketDataError::InvalidQuote(pair.to_string()))
        }
    }

    fn collect_simulated(&self, simulator: &QuoteSimulator) -> Vec<PriceSnapshot> {
        let mut rng = rand::thread_rng();
        simulator.sample_all(&self.pairs, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockQuoteProvider;

    fn pairs(names: &[&str]) -> Vec<String> {
        names.iter().map(|p| p.to_string()).collect()
    }

    fn quote(pair: &str, current: f64) -> Quote {
        Quote {
            pair: pair.to_string(),
            current_price: current,
            previous_close: 1.1,
            high_price: 1.108,
            low_price: 1.102,
        }
    }

    #[tokio::test]
    async fn test_failed_pairs_are_skipped_in_order() {
        let mut provider = MockQuoteProvider::new();
        provider
            .expect_fetch_quote()
            .times(4)
            .returning(|pair| match pair {
                "GBP/USD" => Err(MarketDataError::Status {
                    status: 500,
                    body: "upstream down".to_string(),
                }),
                "USD/JPY" => Ok(quote(pair, 0.0)),
                _ => Ok(quote(pair, 1.105)),
            });

        let ingestor = QuoteIngestor::live(
            pairs(&["EUR/USD", "GBP/USD", "USD/JPY", "AUD/USD"]),
            provider,
        );
        let snapshots = ingestor.collect().await;

        let names: Vec<&str> = snapshots.iter().map(|s| s.pair.as_str()).collect();
        assert_eq!(names, vec!["EUR/USD", "AUD/USD"]);
        assert_eq!(ingestor.mode(), DataMode::Live);
    }

    #[tokio::test]
    async fn test_unusable_quotes_never_reach_the_batch() {
        let mut provider = MockQuoteProvider::new();
        provider.expect_fetch_quote().times(3).returning(|pair| {
            let mut q = quote(pair, 1.105);
            match pair {
                "EUR/USD" => q.previous_close = f64::NAN,
                "GBP/USD" => q.low_price = -1.0,
                _ => {}
            }
            Ok(q)
        });

        let ingestor = QuoteIngestor::live(pairs(&["EUR/USD", "GBP/USD", "NZD/USD"]), provider);
        let snapshots = ingestor.collect().await;

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].pair, "NZD/USD");
        assert!(snapshots[0].change_percent.is_finite());
    }

    #[tokio::test]
    async fn test_every_pair_failing_gives_empty_batch() {
        let mut provider = MockQuoteProvider::new();
        provider
            .expect_fetch_quote()
            .times(2)
            .returning(|pair| Err(MarketDataError::UnknownPair(pair.to_string())));

        let ingestor = QuoteIngestor::live(pairs(&["EUR/USD", "GBP/USD"]), provider);
        assert!(ingestor.collect().await.is_empty());
    }

    #[tokio::test]
    async fn test_live_snapshot_carries_derived_values() {
        let mut provider = MockQuoteProvider::new();
        provider
            .expect_fetch_quote()
            .withf(|pair| pair == "EUR/USD")
            .times(1)
            .returning(|pair| Ok(quote(pair, 1.105)));

        let ingestor = QuoteIngestor::live(pairs(&["EUR/USD"]), provider);
        let snapshots = ingestor.collect().await;

        assert_eq!(snapshots.len(), 1);
        assert!((snapshots[0].change_percent - 0.454545).abs() < 1e-5);
        assert!((snapshots[0].volatility_range - 0.544465).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_simulated_mode_covers_every_pair() {
        let ingestor = QuoteIngestor::simulated(pairs(&["EUR/USD", "GBP/USD", "USD/CAD"]));
        let snapshots = ingestor.collect().await;

        assert_eq!(ingestor.mode(), DataMode::Simulated);
        assert_eq!(snapshots.len(), 3);
        assert!(snapshots.iter().all(|s| (1.0..=1.5).contains(&s.price)));
    }

    #[test]
    fn test_mode_follows_configuration() {
        let simulated = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(
            QuoteIngestor::from_config(&simulated).unwrap().mode(),
            DataMode::Simulated
        );

        let live = AppConfig::from_lookup(|key| {
            (key == "FINNHUB_API_KEY").then(|| "token".to_string())
        })
        .unwrap();
        let ingestor = QuoteIngestor::from_config(&live).unwrap();
        assert_eq!(ingestor.mode(), DataMode::Live);
        assert_eq!(ingestor.pairs().len(), 6);
    }
}
