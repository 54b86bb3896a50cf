use chrono::{DateTime, Local};
use common::models::{
    PRICE_DECIMALS, SignalRecord, SignalStatus, SignalType, Timeframe, Volatility, round_to,
};
use serde::{Deserialize, Deserializer};

const MIN_CONFIDENCE: f64 = 60.0;
const MAX_CONFIDENCE: f64 = 95.0;

/// The model's answer after normalization. `Default` is the fallback for
/// every field the model left out.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSignal {
    pub pair: String,
    pub signal_type: SignalType,
    pub confidence: u8,
    pub volatility: Volatility,
    pub timeframe: Timeframe,
    pub price: f64,
    pub target: f64,
    pub reasoning: String,
}

impl Default for ModelSignal {
    fn default() -> Self {
        Self {
            pair: "UNKNOWN".to_string(),
            signal_type: SignalType::Buy,
            confidence: 75,
            volatility: Volatility::Medium,
            timeframe: Timeframe::Min5,
            price: 0.0,
            target: 0.0,
            reasoning: String::new(),
        }
    }
}

/// Wire shape of the reply. Absent and `null` fields both land as `None`.
#[derive(Debug, Deserialize)]
struct RawModelSignal {
    #[serde(default)]
    pair: Option<String>,
    #[serde(default, rename = "type")]
    signal_type: Option<SignalType>,
    #[serde(default, deserialize_with = "lenient_number")]
    confidence: Option<f64>,
    #[serde(default)]
    volatility: Option<Volatility>,
    #[serde(default)]
    timeframe: Option<Timeframe>,
    #[serde(default, deserialize_with = "lenient_number")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    target: Option<f64>,
    #[serde(default)]
    reasoning: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

/// Accepts `1.085` as well as `"1.085"`. `"NaN"` and `"inf"` are rejected.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Numeric>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Numeric::Number(n)) => Ok(Some(n)),
        Some(Numeric::Text(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Some(n)),
            Ok(_) => Err(serde::de::Error::custom(format!(
                "expected a finite number, got {s:?}"
            ))),
            Err(e) => Err(serde::de::Error::custom(e)),
        },
    }
}

impl ModelSignal {
    /// Applies the defaults to a parsed reply object.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        let raw = RawModelSignal::deserialize(value)?;
        Ok(Self::from(raw))
    }

    /// The model's own `target` is passed through unchecked.
    pub fn to_record(&self, now: DateTime<Local>) -> SignalRecord {
        SignalRecord {
            id: now.timestamp_millis().to_string(),
            pair: self.pair.clone(),
            signal_type: self.signal_type,
            confidence: self.confidence,
            volatility: self.volatility,
            timeframe: self.timeframe,
            price: round_to(self.price, PRICE_DECIMALS),
            target: round_to(self.target, PRICE_DECIMALS),
            timestamp: now.format("%H:%M").to_string(),
            status: SignalStatus::Active,
            reasoning: Some(self.reasoning.clone()),
            change_percent: None,
        }
    }
}

impl From<RawModelSignal> for ModelSignal {
    fn from(raw: RawModelSignal) -> Self {
        let defaults = Self::default();

        Self {
            pair: raw.pair.unwrap_or(defaults.pair),
            signal_type: raw.signal_type.unwrap_or(defaults.signal_type),
            confidence: raw
                .confidence
                .filter(|c| c.is_finite())
                .map(|c| c.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u8)
                .unwrap_or(defaults.confidence),
            volatility: raw.volatility.unwrap_or(defaults.volatility),
            timeframe: raw.timeframe.unwrap_or(defaults.timeframe),
            price: raw.price.unwrap_or(defaults.price),
            target: raw.target.unwrap_or(defaults.target),
            reasoning: raw.reasoning.unwrap_or(defaults.reasoning),
        }
    }
}
