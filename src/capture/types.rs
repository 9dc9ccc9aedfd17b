use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SkinScanError};

/// OS-level capability a source needs before it can produce an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Camera,
    MediaLibrary,
}

impl Capability {
    /// Stable identifier used in the grant ledger.
    pub fn key(&self) -> &'static str {
        match self {
            Capability::Camera => "camera",
            Capability::MediaLibrary => "media_library",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Camera => write!(f, "camera"),
            Capability::MediaLibrary => write!(f, "media library"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// Which source a capture came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Camera,
    Library,
}

/// Local reference to an acquired image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub uri: String,
}

impl ImageRef {
    /// Build a `file://` reference for a local file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let absolute = path.canonicalize().map_err(|e| {
            SkinScanError::CaptureFailed(format!("Cannot resolve {:?}: {}", path, e))
        })?;
        let url = Url::from_file_path(&absolute).map_err(|_| {
            SkinScanError::CaptureFailed(format!("Cannot build file URL for {:?}", absolute))
        })?;
        Ok(Self {
            uri: url.to_string(),
        })
    }

    /// Local filesystem path behind the reference. Accepts `file://` URLs
    /// and bare paths.
    pub fn to_path(&self) -> Option<PathBuf> {
        to_local_path(&self.uri)
    }
}

pub(crate) fn to_local_path(uri: &str) -> Option<PathBuf> {
    match Url::parse(uri) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().ok(),
        Ok(_) => None,
        // Not a URL at all: treat as a plain path
        Err(_) => Some(PathBuf::from(uri)),
    }
}

/// Result of a library pick. Cancelling is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Selected(ImageRef),
    Cancelled,
}
