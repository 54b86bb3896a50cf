/// Price snapshot for one instrument as reported by a live provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub pair: String,
    pub current_price: f64,
    pub previous_close: f64,
    pub high_price: f64,
    pub low_price: f64,
}

impl Quote {
    /// All prices the classifier divides by must be strictly positive.
    pub fn is_valid(&self) -> bool {
        [
            self.current_price,
            self.previous_close,
            self.high_price,
            self.low_price,
        ]
        .iter()
        .all(|p| p.is_finite())
            && self.current_price > 0.0
            && self.previous_close > 0.0
            && self.low_price > 0.0
    }

    pub fn change_percent(&self) -> f64 {
        (self.current_price - self.previous_close) / self.previous_close * 100.0
    }

    pub fn volatility_range(&self) -> f64 {
        (self.high_price - self.low_price) / self.low_price * 100.0
    }

    pub fn to_snapshot(&self) -> PriceSnapshot {
        PriceSnapshot {
            pair: self.pair.clone(),
            price: self.current_price,
            change_percent: self.change_percent(),
            volatility_range: self.volatility_range(),
        }
    }
}

/// Classifier input: the three numbers a signal is derived from.
///
/// Live quotes are reduced to this shape by [`Quote::to_snapshot`]; the
/// simulator draws the three values independently.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    pub pair: String,
    pub price: f64,
    pub change_percent: f64,
    pub volatility_range: f64,
}
