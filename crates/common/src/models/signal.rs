use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalType {
    #[serde(rename = "BUY", alias = "buy", alias = "Buy")]
    Buy,
    #[serde(rename = "SELL", alias = "sell", alias = "Sell")]
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Volatility {
    #[serde(rename = "low", alias = "LOW", alias = "Low")]
    Low,
    #[serde(rename = "medium", alias = "MEDIUM", alias = "Medium")]
    Medium,
    #[serde(rename = "high", alias = "HIGH", alias = "High")]
    High,
}

/// Suggested horizon of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "15s")]
    Sec15,
    #[serde(rename = "30s")]
    Sec30,
    #[serde(rename = "1m")]
    Min1,
    #[serde(rename = "2m")]
    Min2,
    #[serde(rename = "5m")]
    Min5,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sec15 => "15s",
            Self::Sec30 => "30s",
            Self::Min1 => "1m",
            Self::Min2 => "2m",
            Self::Min5 => "5m",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStatus {
    #[default]
    Active,
}

/// The record both endpoints hand back to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRecord {
    pub id: String,
    pub pair: String,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub confidence: u8,
    pub volatility: Volatility,
    pub timeframe: Timeframe,
    pub price: f64,
    pub target: f64,
    /// Wall clock `HH:MM`.
    pub timestamp: String,
    pub status: SignalStatus,
    // Vision-derived records only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    // Quote-derived records only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}
