pub mod analyze;
pub mod quotes;

pub use analyze::AnalyzeEndpoint;
pub use quotes::QuotesEndpoint;
