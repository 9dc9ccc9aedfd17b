use serde::{Deserialize, Serialize};

use crate::error::{Result, SkinScanError};

/// Tokens returned by a successful sign-in or sign-up.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
    pub local_id: String,
    /// Seconds until `id_token` expires, as sent by the provider
    #[serde(default)]
    pub expires_in: Option<String>,
}

/// What is kept in the keychain between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub email: String,
    pub refresh_token: String,
}

impl From<&AuthSession> for StoredSession {
    fn from(session: &AuthSession) -> Self {
        Self {
            email: session.email.clone(),
            refresh_token: session.refresh_token.clone(),
        }
    }
}

/// Sign-up form contents.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(SkinScanError::Auth("Please enter your email address.".to_string()));
        }
        if self.password != self.confirm_password {
            return Err(SkinScanError::Auth("Passwords do not match!".to_string()));
        }
        Ok(())
    }
}
