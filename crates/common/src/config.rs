use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_PAIRS: &[&str; 6] = &[
    "EUR/USD", "GBP/USD", "USD/JPY", "AUD/USD", "USD/CAD", "NZD/USD",
];

const FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("SIGNAL_PAIRS must name at least one pair")]
    NoPairs,
}

/// Where quote data comes from. Decided once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    Live,
    Simulated,
}

#[derive(Debug, Clone)]
pub struct FinnhubSettings {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pairs: Vec<String>,
    /// `None` means the quote endpoint serves simulated data.
    pub finnhub: Option<FinnhubSettings>,
    /// `None` means the analyze endpoint answers 503.
    pub openai: Option<OpenAiSettings>,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let pairs = match non_blank("SIGNAL_PAIRS") {
            Some(raw) => {
                let pairs: Vec<String> = raw
                    .split(',')
                    .map(|p| p.trim().to_uppercase())
                    .filter(|p| !p.is_empty())
                    .collect();
                if pairs.is_empty() {
                    return Err(ConfigError::NoPairs);
                }
                pairs
            }
            None => DEFAULT_PAIRS.iter().map(|p| p.to_string()).collect(),
        };

        let finnhub = match non_blank("FINNHUB_API_KEY") {
            Some(api_key) => Some(FinnhubSettings {
                api_key: api_key.trim().to_string(),
                base_url: non_blank("FINNHUB_BASE_URL")
                    .unwrap_or_else(|| FINNHUB_BASE_URL.to_string()),
                timeout: Duration::from_secs(parse_or(
                    "QUOTE_TIMEOUT_SECS",
                    non_blank("QUOTE_TIMEOUT_SECS"),
                    5,
                )?),
            }),
            None => None,
        };

        let openai = match non_blank("OPENAI_API_KEY") {
            Some(api_key) => Some(OpenAiSettings {
                api_key: api_key.trim().to_string(),
                base_url: non_blank("OPENAI_BASE_URL")
                    .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
                model: non_blank("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
                max_tokens: parse_or("OPENAI_MAX_TOKENS", non_blank("OPENAI_MAX_TOKENS"), 500)?,
                temperature: parse_or(
                    "OPENAI_TEMPERATURE",
                    non_blank("OPENAI_TEMPERATURE"),
                    0.3,
                )?,
                timeout: Duration::from_secs(parse_or(
                    "OPENAI_TIMEOUT_SECS",
                    non_blank("OPENAI_TIMEOUT_SECS"),
                    60,
                )?),
            }),
            None => None,
        };

        Ok(Self {
            pairs,
            finnhub,
            openai,
        })
    }

    pub fn data_mode(&self) -> DataMode {
        if self.finnhub.is_some() {
            DataMode::Live
        } else {
            DataMode::Simulated
        }
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
                value,
            }),
        None => Ok(default),
    }
}
