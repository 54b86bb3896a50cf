use chrono::{DateTime, Local};
use common::OpenAiSettings;
use common::models::SignalRecord;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::VisionError;
use crate::fence::extract_payload;
use crate::openai_client::OpenAiVisionClient;
use crate::schema::ModelSignal;
use crate::traits::VisionModel;

/// Normalized signal plus the model's object exactly as parsed.
#[derive(Debug, Clone, Serialize)]
pub struct VisionAnalysis {
    pub signal: SignalRecord,
    pub analysis: Value,
}

/// One model call per chart, no retries.
pub struct VisionSignalExtractor {
    model: Box<dyn VisionModel>,
}

impl VisionSignalExtractor {
    pub fn new<M: VisionModel + 'static>(model: M) -> Self {
        Self {
            model: Box::new(model),
        }
    }

    pub fn from_settings(settings: &OpenAiSettings) -> Result<Self, VisionError> {
        Ok(Self::new(OpenAiVisionClient::new(settings)?))
    }

    pub async fn analyze(&self, image_base64: &str) -> Result<VisionAnalysis, VisionError> {
        if image_base64.trim().is_empty() {
            return Err(VisionError::MissingImage);
        }

        let reply = self.model.describe_chart(image_base64).await?;
        debug!("Model reply: {}", reply);

        let analysis = Self::interpret(&reply, Local::now())?;
        info!(
            "Chart signal {} {:?} conf={} tf={}",
            analysis.signal.pair,
            analysis.signal.signal_type,
            analysis.signal.confidence,
            analysis.signal.timeframe
        );
        Ok(analysis)
    }

    /// Turns the model's free text into a signal.
    pub fn interpret(reply: &str, now: DateTime<Local>) -> Result<VisionAnalysis, VisionError> {
        let payload = extract_payload(reply)?;
        let analysis: Value = serde_json::from_str(payload)?;

        if !analysis.is_object() {
            return Err(VisionError::InvalidJson(format!(
                "expected a JSON object, got {}",
                analysis
            )));
        }

        let signal = ModelSignal::from_value(&analysis)?.to_record(now);
        Ok(VisionAnalysis { signal, analysis })
    }
}
