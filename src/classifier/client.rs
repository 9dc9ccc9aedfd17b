//! HTTP client for the prediction endpoint.
//!
//! Wire format: `POST <endpoint>` with a JSON array holding exactly one
//! base64 image string, answered by `{"result": "<label>"}`. One attempt
//! per call; there are no retries.

use std::future::Future;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::{error, info};
use url::Url;

use super::types::PredictResponse;
use crate::error::{Result, SkinScanError};

/// Hosted prediction endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://model-api-ngyl.onrender.com/predict";

/// Turns an encoded image into a raw classifier label.
pub trait Classifier: Send + Sync {
    fn classify(&self, image_base64: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Classifier backed by the remote prediction endpoint.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpClassifier {
    /// Build a client for `endpoint`. Without `timeout` the request is only
    /// bounded by the transport's own limits.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            SkinScanError::Config(format!("Invalid classifier endpoint '{}': {}", endpoint, e))
        })?;

        let mut builder =
            reqwest::Client::builder().user_agent(concat!("SkinScan/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SkinScanError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }
}

impl Classifier for HttpClassifier {
    async fn classify(&self, image_base64: &str) -> Result<String> {
        info!(
            "Sending {} base64 chars to {}",
            image_base64.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&build_payload(image_base64))
            .send()
            .await
            .map_err(|e| {
                error!("Classifier request failed: {}", e);
                SkinScanError::ClassificationFailed(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            SkinScanError::ClassificationFailed(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            error!("Classifier returned {}: {}", status, truncate(&body, 200));
            return Err(SkinScanError::ClassificationFailed(format!(
                "Classifier returned {}",
                status
            )));
        }

        let label = parse_response(&body)?;
        info!("Classifier answered '{}'", label);
        Ok(label)
    }
}

/// Request body: a one-element JSON array wrapping the image string.
pub fn build_payload(image_base64: &str) -> Value {
    json!([image_base64])
}

/// Extract the raw label from a response body.
pub fn parse_response(body: &str) -> Result<String> {
    let parsed: PredictResponse = serde_json::from_str(body).map_err(|e| {
        SkinScanError::ClassificationFailed(format!(
            "Malformed response: {}. Body (first 200 chars): {}",
            e,
            truncate(body, 200)
        ))
    })?;
    Ok(parsed.result)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_single_element_array() {
        let payload = build_payload("aGVsbG8=");
        assert_eq!(payload.to_string(), r#"["aGVsbG8="]"#);
    }

    #[test]
    fn test_parse_response() {
        assert_eq!(parse_response(r#"{"result":"Bruises"}"#).unwrap(), "Bruises");
        assert_eq!(
            parse_response(r#"{"result":"Wart","confidence":0.4}"#).unwrap(),
            "Wart"
        );
    }

    #[test]
    fn test_parse_response_malformed() {
        for body in ["", "not json", r#"{"label":"Cuts"}"#, r#"{"result":7}"#, r#"["Cuts"]"#] {
            let result = parse_response(body);
            assert!(
                matches!(result, Err(SkinScanError::ClassificationFailed(_))),
                "body {:?} should fail",
                body
            );
        }
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        let result = HttpClassifier::new("not a url", None);
        assert!(matches!(result, Err(SkinScanError::Config(_))));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
