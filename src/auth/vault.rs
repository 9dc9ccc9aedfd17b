use keyring::Entry;
use tracing::{info, warn};

use super::types::StoredSession;
use crate::error::{Result, SkinScanError};

const KEYRING_USER: &str = "skinscan";

/// Keeps the signed-in session in the OS keychain.
pub struct SessionVault {
    service: String,
}

impl SessionVault {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, KEYRING_USER).map_err(|e| {
            warn!("Failed to create keyring entry for {}: {}", self.service, e);
            SkinScanError::Keychain(e.to_string())
        })
    }

    pub fn save(&self, session: &StoredSession) -> Result<()> {
        let json = serde_json::to_string(session)
            .map_err(|e| SkinScanError::Keychain(format!("Failed to serialize session: {}", e)))?;
        self.entry()?.set_password(&json).map_err(|e| {
            warn!("Failed to store session for {}: {}", self.service, e);
            SkinScanError::Keychain(e.to_string())
        })?;
        info!("Stored session for {}", session.email);
        Ok(())
    }

    pub fn load(&self) -> Result<Option<StoredSession>> {
        match self.entry()?.get_password() {
            Ok(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| SkinScanError::Keychain(format!("Stored session unreadable: {}", e))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => {
                warn!("Failed to read session for {}: {}", self.service, e);
                Err(SkinScanError::Keychain(e.to_string()))
            }
        }
    }

    /// Forget the stored session. Clearing when nothing is stored is fine.
    pub fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                info!("Cleared stored session");
                Ok(())
            }
            Err(e) => Err(SkinScanError::Keychain(e.to_string())),
        }
    }
}
