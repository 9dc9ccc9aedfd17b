use serde::Serialize;

use crate::capture::Capability;
use crate::error::SkinScanError;

/// User-facing failure notice, shown once per failed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&SkinScanError> for Alert {
    fn from(err: &SkinScanError) -> Self {
        match err {
            SkinScanError::PermissionDenied(Capability::Camera) => {
                Alert::new("Permission Required", "Camera access is needed.")
            }
            SkinScanError::PermissionDenied(Capability::MediaLibrary) => Alert::new(
                "Permission Required",
                "Media access is needed to upload photos.",
            ),
            SkinScanError::CaptureFailed(_) => Alert::new("Error", "Failed to take picture"),
            SkinScanError::EncodingFailed(_)
            | SkinScanError::ClassificationFailed(_)
            | SkinScanError::StorageReadFailed(_)
            | SkinScanError::StorageWriteFailed(_) => Alert::new("Error", "Prediction failed"),
            other => Alert::new("Error", other.to_string()),
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
