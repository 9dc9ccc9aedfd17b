//! Remote skin-condition classification.

mod client;
mod types;

pub use client::{build_payload, parse_response, Classifier, HttpClassifier, DEFAULT_ENDPOINT};
pub use types::PredictResponse;
