use std::ops::RangeInclusive;

use common::models::{PRICE_DECIMALS, PriceSnapshot, round_to};
use rand::Rng;

/// Stand-in quote source for when no provider credential is configured.
///
/// Price, change and range are drawn independently, so a snapshot is not
/// internally consistent. It exists to keep the dashboard populated.
#[derive(Debug, Clone)]
pub struct QuoteSimulator {
    price: RangeInclusive<f64>,
    change_percent: RangeInclusive<f64>,
    volatility_range: RangeInclusive<f64>,
}

impl Default for QuoteSimulator {
    fn default() -> Self {
        Self {
            price: 1.0..=1.5,
            change_percent: -2.0..=2.0,
            volatility_range: 0.0..=0.5,
        }
    }
}

impl QuoteSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample<R: Rng>(&self, pair: &str, rng: &mut R) -> PriceSnapshot {
        PriceSnapshot {
            pair: pair.to_string(),
            price: round_to(rng.gen_range(self.price.clone()), PRICE_DECIMALS),
            change_percent: rng.gen_range(self.change_percent.clone()),
            volatility_range: rng.gen_range(self.volatility_range.clone()),
        }
    }

    pub fn sample_all<R: Rng>(&self, pairs: &[String], rng: &mut R) -> Vec<PriceSnapshot> {
        pairs.iter().map(|pair| self.sample(pair, &mut *rng)).collect()
    }
}
