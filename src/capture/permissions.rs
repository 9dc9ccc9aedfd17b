use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::types::{Capability, PermissionStatus};
use crate::prompt::Prompter;
use crate::storage::KeyValueStore;

/// Storage key holding the JSON grant ledger.
pub const PERMISSIONS_KEY: &str = "permissions";

/// Grants access to device capabilities.
pub trait PermissionBroker: Send + Sync {
    /// Current status without prompting.
    fn status(&self, capability: Capability) -> PermissionStatus;

    /// Ask for the capability. Already-granted capabilities return
    /// `Granted` without asking again.
    fn request(&self, capability: Capability) -> PermissionStatus;
}

/// Permission grants remembered in the key-value store, asked through a
/// `Prompter` when missing or previously denied.
pub struct StoredPermissions {
    store: Arc<dyn KeyValueStore>,
    prompter: Arc<dyn Prompter>,
}

impl StoredPermissions {
    pub fn new(store: Arc<dyn KeyValueStore>, prompter: Arc<dyn Prompter>) -> Self {
        Self { store, prompter }
    }

    fn ledger(&self) -> HashMap<String, PermissionStatus> {
        match self.store.get(PERMISSIONS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Permission ledger unparsable, starting over: {}", e);
                HashMap::new()
            }),
            Ok(None) => HashMap::new(),
            Err(e) => {
                warn!("Failed to read permission ledger: {}", e);
                HashMap::new()
            }
        }
    }

    fn record(&self, capability: Capability, status: PermissionStatus) {
        let mut ledger = self.ledger();
        ledger.insert(capability.key().to_string(), status);
        let result = serde_json::to_string(&ledger)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.store
                    .set(PERMISSIONS_KEY, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            // The answer still holds for this request
            warn!("Failed to remember {} permission: {}", capability, e);
        }
    }

    /// Forget every recorded grant.
    pub fn reset(&self) -> crate::error::Result<()> {
        self.store.remove(PERMISSIONS_KEY)
    }
}

impl PermissionBroker for StoredPermissions {
    fn status(&self, capability: Capability) -> PermissionStatus {
        self.ledger()
            .get(capability.key())
            .copied()
            .unwrap_or(PermissionStatus::Undetermined)
    }

    fn request(&self, capability: Capability) -> PermissionStatus {
        if self.status(capability) == PermissionStatus::Granted {
            return PermissionStatus::Granted;
        }

        let message = match capability {
            Capability::Camera => "Allow SkinScan to use the camera?",
            Capability::MediaLibrary => "Allow SkinScan to read photos from your library?",
        };
        let status = if self.prompter.confirm("Permission Request", message) {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };

        info!("{} permission {:?}", capability, status);
        self.record(capability, status);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use crate::storage::MemoryStore;

    fn broker(confirms: Vec<bool>) -> (StoredPermissions, Arc<ScriptedPrompter>) {
        let prompter = Arc::new(ScriptedPrompter::new().with_confirms(confirms));
        let broker = StoredPermissions::new(Arc::new(MemoryStore::new()), prompter.clone());
        (broker, prompter)
    }

    #[test]
    fn test_undetermined_by_default() {
        let (broker, _) = broker(vec![]);
        assert_eq!(broker.status(Capability::Camera), PermissionStatus::Undetermined);
    }

    #[test]
    fn test_grant_is_remembered_and_not_reprompted() {
        let (broker, prompter) = broker(vec![true]);

        assert_eq!(broker.request(Capability::Camera), PermissionStatus::Granted);
        assert_eq!(broker.request(Capability::Camera), PermissionStatus::Granted);
        assert_eq!(prompter.asked().len(), 1);
        assert_eq!(broker.status(Capability::Camera), PermissionStatus::Granted);
    }

    #[test]
    fn test_denial_is_recorded_and_next_request_prompts_again() {
        let (broker, prompter) = broker(vec![false, true]);

        assert_eq!(broker.request(Capability::MediaLibrary), PermissionStatus::Denied);
        assert_eq!(broker.status(Capability::MediaLibrary), PermissionStatus::Denied);

        assert_eq!(broker.request(Capability::MediaLibrary), PermissionStatus::Granted);
        assert_eq!(prompter.asked().len(), 2);
    }

    #[test]
    fn test_capabilities_are_independent() {
        let (broker, _) = broker(vec![true]);
        broker.request(Capability::Camera);
        assert_eq!(broker.status(Capability::MediaLibrary), PermissionStatus::Undetermined);
    }

    #[test]
    fn test_reset() {
        let (broker, _) = broker(vec![true]);
        broker.request(Capability::Camera);
        broker.reset().unwrap();
        assert_eq!(broker.status(Capability::Camera), PermissionStatus::Undetermined);
    }
}
