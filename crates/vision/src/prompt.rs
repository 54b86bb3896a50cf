pub const SYSTEM_PROMPT: &str = r#"You are an expert in technical analysis of forex charts. Analyze the chart and reply with JSON only:
{
  "pair": "EUR/USD",
  "type": "BUY or SELL",
  "confidence": number 65-95,
  "timeframe": "15s/30s/1m/2m/5m",
  "price": current price,
  "target": target price,
  "volatility": "low/medium/high",
  "reasoning": "short explanation of the signal"
}

Consider the trend, support and resistance levels, candlestick patterns and volume. Be precise."#;

pub const USER_PROMPT: &str =
    "Analyze the chart and give a trading signal for the next few seconds";

/// Screenshots are sent as JPEG data URLs unless the caller already built one.
pub fn image_data_url(image_base64: &str) -> String {
    if image_base64.starts_with("data:") {
        image_base64.to_string()
    } else {
        format!("data:image/jpeg;base64,{}", image_base64)
    }
}
