//! Chart screenshot analysis.
//!
//! A multimodal chat model is asked for a signal in a fixed JSON shape. Its
//! reply is unwrapped from an optional code fence, parsed, and normalized
//! into a [`common::models::SignalRecord`].

pub mod error;
pub mod extractor;
pub mod fence;
pub mod openai_client;
pub mod prompt;
pub mod schema;
pub mod traits;

pub use error::VisionError;
pub use extractor::{VisionAnalysis, VisionSignalExtractor};
pub use fence::{FenceError, extract_payload};
pub use openai_client::OpenAiVisionClient;
pub use schema::ModelSignal;
pub use traits::VisionModel;
