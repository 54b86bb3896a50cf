use common::models::Quote;
use serde::Deserialize;

/// Body of Finnhub's `/quote` endpoint. Only the fields the classifier
/// needs are kept.
#[derive(Deserialize, Debug)]
pub struct FinnhubQuoteResponse {
    #[serde(rename(deserialize = "c"))]
    pub current_price: Option<f64>,
    #[serde(rename(deserialize = "pc"))]
    pub previous_close: Option<f64>,
    #[serde(rename(deserialize = "h"))]
    pub high_price: Option<f64>,
    #[serde(rename(deserialize = "l"))]
    pub low_price: Option<f64>,
}

impl FinnhubQuoteResponse {
    /// Missing reference prices fall back to the current price.
    pub fn to_quote(&self, pair: &str) -> Quote {
        let current = self.current_price.unwrap_or(0_f64);

        Quote {
            pair: pair.to_string(),
            current_price: current,
            previous_close: self.previous_close.unwrap_or(current),
            high_price: self.high_price.unwrap_or(current),
            low_price: self.low_price.unwrap_or(current),
        }
    }
}
