use thiserror::Error;

use crate::capture::Capability;

#[derive(Debug, Error)]
pub enum SkinScanError {
    #[error("Permission denied: {0}")]
    PermissionDenied(Capability),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Classification failed: {0}")]
    ClassificationFailed(String),

    #[error("Storage read failed: {0}")]
    StorageReadFailed(String),

    #[error("Storage write failed: {0}")]
    StorageWriteFailed(String),

    #[error("Invalid transition: cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Keychain error: {0}")]
    Keychain(String),
}

pub type Result<T> = std::result::Result<T, SkinScanError>;

impl From<SkinScanError> for String {
    fn from(err: SkinScanError) -> Self {
        err.to_string()
    }
}
