//! REST client for an Identity Toolkit compatible provider.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::types::{AuthSession, SignUpRequest};
use crate::error::{Result, SkinScanError};

pub const DEFAULT_AUTH_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

/// Email/password identity operations.
pub trait AuthClient: Send + Sync {
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthSession>> + Send;

    fn sign_up(&self, request: &SignUpRequest) -> impl Future<Output = Result<AuthSession>> + Send;

    fn send_password_reset(&self, email: &str) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone)]
pub struct IdentityToolkitClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl IdentityToolkitClient {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(SkinScanError::Config(
                "No auth api_key configured. Set [auth] api_key in config.toml.".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!("SkinScan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SkinScanError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: Value) -> Result<T> {
        let url = format!("{}/accounts:{}", self.endpoint, method);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| SkinScanError::Auth(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SkinScanError::Auth(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = provider_error_message(&text).unwrap_or_else(|| status.to_string());
            warn!("accounts:{} failed: {}", method, message);
            return Err(SkinScanError::Auth(message));
        }

        serde_json::from_str(&text)
            .map_err(|e| SkinScanError::Auth(format!("Malformed response: {}", e)))
    }
}

impl AuthClient for IdentityToolkitClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let session: AuthSession = self
            .call("signInWithPassword", credentials_body(email, password))
            .await?;
        info!("Signed in as {}", session.email);
        Ok(session)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthSession> {
        request.validate()?;
        let session: AuthSession = self
            .call("signUp", credentials_body(&request.email, &request.password))
            .await?;
        info!("Created account {}", session.email);
        Ok(session)
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(SkinScanError::Auth(
                "Please enter your email address.".to_string(),
            ));
        }
        let _: Value = self
            .call(
                "sendOobCode",
                json!({ "requestType": "PASSWORD_RESET", "email": email }),
            )
            .await?;
        info!("Password reset email sent to {}", email);
        Ok(())
    }
}

fn credentials_body(email: &str, password: &str) -> Value {
    json!({
        "email": email,
        "password": password,
        "returnSecureToken": true,
    })
}

/// Pull `error.message` out of a provider error body.
fn provider_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}
