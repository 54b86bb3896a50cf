pub mod quote_ingestor;
pub mod simulator;

pub use quote_ingestor::QuoteIngestor;
pub use simulator::QuoteSimulator;
