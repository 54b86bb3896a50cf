pub mod envelope;
pub mod handlers;

pub use envelope::{Envelope, Request, Response};
pub use handlers::{AnalyzeEndpoint, QuotesEndpoint};
