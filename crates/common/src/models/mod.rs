pub mod quote;
pub mod signal;

pub use quote::{PriceSnapshot, Quote};
pub use signal::{SignalRecord, SignalStatus, SignalType, Timeframe, Volatility};

/// Decimal places kept on every published price.
pub const PRICE_DECIMALS: i32 = 5;

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
