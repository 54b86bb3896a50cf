use chrono::{DateTime, Local};
use common::models::{
    PRICE_DECIMALS, PriceSnapshot, SignalRecord, SignalStatus, SignalType, Timeframe, Volatility,
    round_to,
};
use tracing::debug;

const BASE_CONFIDENCE: f64 = 70.0;
const CONFIDENCE_PER_PERCENT: f64 = 10.0;
const MIN_CONFIDENCE: i64 = 60;
const MAX_CONFIDENCE: i64 = 95;

const LOW_VOLATILITY_BELOW: f64 = 0.1;
const MEDIUM_VOLATILITY_BELOW: f64 = 0.3;

/// `|change_percent|` must be strictly above the bound to pick the timeframe.
/// Checked top to bottom.
const TIMEFRAME_STEPS: [(f64, Timeframe); 4] = [
    (1.5, Timeframe::Sec15),
    (1.0, Timeframe::Sec30),
    (0.5, Timeframe::Min1),
    (0.3, Timeframe::Min2),
];

/// Turns a price snapshot into a signal. Pure apart from the clock that is
/// passed in.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignalClassifier;

impl SignalClassifier {
    pub fn classify(snapshot: &PriceSnapshot, now: DateTime<Local>) -> SignalRecord {
        let change = snapshot.change_percent;
        let signal_type = Self::signal_type(change);
        let timeframe = Self::timeframe(change);
        let target = snapshot.price * Self::target_multiplier(timeframe, signal_type);

        SignalRecord {
            id: Self::signal_id(&snapshot.pair, now),
            pair: snapshot.pair.clone(),
            signal_type,
            confidence: Self::confidence(change),
            volatility: Self::volatility(snapshot.volatility_range),
            timeframe,
            price: round_to(snapshot.price, PRICE_DECIMALS),
            target: round_to(target, PRICE_DECIMALS),
            timestamp: now.format("%H:%M").to_string(),
            status: SignalStatus::Active,
            reasoning: None,
            change_percent: Some(round_to(change, 2)),
        }
    }

    pub fn classify_all(snapshots: &[PriceSnapshot], now: DateTime<Local>) -> Vec<SignalRecord> {
        snapshots
            .iter()
            .map(|snapshot| {
                let signal = Self::classify(snapshot, now);
                debug!(
                    "{} {:?} conf={} tf={} vol={:?} change={:.4}%",
                    signal.pair,
                    signal.signal_type,
                    signal.confidence,
                    signal.timeframe,
                    signal.volatility,
                    snapshot.change_percent
                );
                signal
            })
            .collect()
    }

    /// A flat market counts as SELL.
    pub fn signal_type(change_percent: f64) -> SignalType {
        if change_percent > 0.0 {
            SignalType::Buy
        } else {
            SignalType::Sell
        }
    }

    pub fn confidence(change_percent: f64) -> u8 {
        let raw = (BASE_CONFIDENCE + change_percent.abs() * CONFIDENCE_PER_PERCENT) as i64;
        raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u8
    }

    pub fn volatility(volatility_range: f64) -> Volatility {
        if volatility_range < LOW_VOLATILITY_BELOW {
            Volatility::Low
        } else if volatility_range < MEDIUM_VOLATILITY_BELOW {
            Volatility::Medium
        } else {
            Volatility::High
        }
    }

    pub fn timeframe(change_percent: f64) -> Timeframe {
        let magnitude = change_percent.abs();
        TIMEFRAME_STEPS
            .iter()
            .find(|(bound, _)| magnitude > *bound)
            .map(|(_, timeframe)| *timeframe)
            .unwrap_or(Timeframe::Min5)
    }

    /// Faster timeframes aim for smaller moves.
    pub fn target_multiplier(timeframe: Timeframe, signal_type: SignalType) -> f64 {
        let move_percent = match timeframe {
            Timeframe::Sec15 => 0.05,
            Timeframe::Sec30 => 0.1,
            Timeframe::Min1 => 0.15,
            Timeframe::Min2 => 0.2,
            Timeframe::Min5 => 0.3,
        };

        match signal_type {
            SignalType::Buy => 1.0 + move_percent / 100.0,
            SignalType::Sell => 1.0 - move_percent / 100.0,
        }
    }

    /// `EUR/USD` at unix second 1700000000 becomes `EURUSD-1700000000`.
    pub fn signal_id(pair: &str, now: DateTime<Local>) -> String {
        format!("{}-{}", pair.replace('/', ""), now.timestamp())
    }
}
