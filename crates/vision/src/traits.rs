use async_trait::async_trait;

use crate::error::VisionError;

/// A multimodal model that looks at one chart and answers in free text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisionModel: Send + Sync {
    async fn describe_chart(&self, image_base64: &str) -> Result<String, VisionError>;
}
