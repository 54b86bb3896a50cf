use common::AppConfig;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::warn;
use vision::{VisionAnalysis, VisionError, VisionSignalExtractor};

use crate::envelope::{Envelope, Request, Response};

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    image: Option<String>,
}

/// `POST {"image": "<base64>"}` endpoint. All or nothing: any failure
/// along the way becomes the response.
pub struct AnalyzeEndpoint {
    /// `None` when no model credential is configured.
    extractor: Option<VisionSignalExtractor>,
    envelope: Envelope,
}

impl AnalyzeEndpoint {
    pub fn new(extractor: Option<VisionSignalExtractor>) -> Self {
        Self {
            extractor,
            envelope: Envelope::post(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, VisionError> {
        let extractor = match &config.openai {
            Some(settings) => Some(VisionSignalExtractor::from_settings(settings)?),
            None => None,
        };
        Ok(Self::new(extractor))
    }

    pub async fn handle(&self, request: &Request) -> Response {
        if let Some(response) = self.envelope.guard(request) {
            return response;
        }

        match self.analyze(request).await {
            Ok(analysis) => self.envelope.json(StatusCode::OK, &analysis),
            Err(e) => {
                warn!("Chart analysis failed: {}", e);
                let status = StatusCode::from_u16(e.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                self.envelope.error(status, e)
            }
        }
    }

    async fn analyze(&self, request: &Request) -> Result<VisionAnalysis, VisionError> {
        let body = request
            .body
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or("{}");
        let payload: AnalyzeRequest = serde_json::from_str(body)?;

        let image = payload
            .image
            .filter(|image| !image.is_empty())
            .ok_or(VisionError::MissingImage)?;
        let extractor = self
            .extractor
            .as_ref()
            .ok_or(VisionError::MissingCredential)?;

        extractor.analyze(&image).await
    }
}
