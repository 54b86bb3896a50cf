use thiserror::Error;

use crate::fence::FenceError;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Image is required")]
    MissingImage,

    #[error("OPENAI_API_KEY not configured")]
    MissingCredential,

    #[error("OpenAI API error: {body}")]
    Upstream { status: u16, body: String },

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected model response: {0}")]
    InvalidResponse(String),
}

impl VisionError {
    /// HTTP status the analyze endpoint answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingImage | Self::InvalidJson(_) => 400,
            Self::MissingCredential => 503,
            Self::Upstream { status, .. } => *status,
            Self::Http(_) | Self::InvalidResponse(_) => 500,
        }
    }
}

impl From<serde_json::Error> for VisionError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}

impl From<FenceError> for VisionError {
    fn from(err: FenceError) -> Self {
        Self::InvalidJson(err.to_string())
    }
}
