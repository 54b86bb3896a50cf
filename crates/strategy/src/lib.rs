pub mod services;

pub use services::classifier::SignalClassifier;
