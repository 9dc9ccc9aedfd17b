//! Application configuration from `config.toml`.
//!
//! Every key is optional. A missing file means defaults; a file that does
//! not parse is an error rather than a silent fallback.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::auth::DEFAULT_AUTH_ENDPOINT;
use crate::classifier::DEFAULT_ENDPOINT;
use crate::error::{Result, SkinScanError};

const APP_DIR: &str = "skinscan";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classifier_endpoint: String,
    /// No timeout when unset
    pub request_timeout_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
    /// Capture program argv; `{output}` becomes the photo path
    pub camera_command: Vec<String>,
    /// Custom label table replacing the embedded one
    pub label_table: Option<PathBuf>,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            classifier_endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
            data_dir: None,
            camera_command: vec![
                "fswebcam".to_string(),
                "--no-banner".to_string(),
                "{output}".to_string(),
            ],
            label_table: None,
            auth: AuthConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            api_key: None,
        }
    }
}

impl AppConfig {
    /// Default location: `<config_dir>/skinscan/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                debug!("No config directory available, using defaults");
                return Ok(Self::default());
            }
        };

        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| SkinScanError::Config(format!("Failed to read {:?}: {}", path, e)))?;
        let config = Self::from_toml(&content)
            .map_err(|e| SkinScanError::Config(format!("{:?}: {}", path, e)))?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SkinScanError::Config(e.to_string()))
    }

    /// Apply `SKINSCAN_*` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup("SKINSCAN_CLASSIFIER_ENDPOINT").filter(|v| !v.is_empty()) {
            self.classifier_endpoint = endpoint;
        }
        if let Some(dir) = lookup("SKINSCAN_DATA_DIR").filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Resolved data directory: configured, else `<data_dir>/skinscan`,
    /// else `./.skinscan`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from(".skinscan"))
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("storage.db")
    }

    pub fn captures_dir(&self) -> PathBuf {
        self.data_dir().join("captures")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(
            config.classifier_endpoint,
            "https://model-api-ngyl.onrender.com/predict"
        );
        assert!(config.request_timeout().is_none());
        assert_eq!(config.camera_command.last().unwrap(), "{output}");
        assert_eq!(config.auth.endpoint, DEFAULT_AUTH_ENDPOINT);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
request_timeout_secs = 30
data_dir = "/var/lib/skinscan"

[auth]
api_key = "abc"
"#,
        )
        .unwrap();

        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.database_path(), PathBuf::from("/var/lib/skinscan/storage.db"));
        assert_eq!(config.captures_dir(), PathBuf::from("/var/lib/skinscan/captures"));
        assert_eq!(config.auth.api_key.as_deref(), Some("abc"));
        assert_eq!(config.auth.endpoint, DEFAULT_AUTH_ENDPOINT);
        assert_eq!(config.classifier_endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();

        let result = AppConfig::load(Some(&path));
        assert!(matches!(result, Err(SkinScanError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.classifier_endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| match key {
            "SKINSCAN_CLASSIFIER_ENDPOINT" => Some("http://localhost:8000/predict".to_string()),
            "SKINSCAN_DATA_DIR" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.classifier_endpoint, "http://localhost:8000/predict");
        assert!(config.data_dir.is_none());
    }
}
