use serde::Deserialize;

/// Body returned by the prediction endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    /// Raw label, e.g. "Bruises"
    pub result: String,
}
