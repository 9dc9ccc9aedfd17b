//! Label table loading.
//!
//! - `default_table()` - the vocabulary embedded in the binary
//! - `LabelTable::load(path)` - a custom vocabulary from a TOML file

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use tracing::info;

use super::types::{Diagnosis, LabelTableConfig};
use crate::error::{Result, SkinScanError};

/// Default vocabulary, loaded from `config/labels.toml` at compile time.
const DEFAULT_LABELS: &str = include_str!("../../config/labels.toml");

static DEFAULT_TABLE: OnceLock<LabelTable> = OnceLock::new();

/// Exact-match lookup from raw classifier label to diagnosis.
#[derive(Debug, Clone)]
pub struct LabelTable {
    entries: HashMap<String, Diagnosis>,
}

impl LabelTable {
    /// Parse a label table from TOML text. Later rows win on duplicate labels.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: LabelTableConfig = toml::from_str(content)
            .map_err(|e| SkinScanError::Config(format!("Invalid label table: {}", e)))?;

        let entries = config
            .labels
            .into_iter()
            .map(|entry| {
                (
                    entry.label,
                    Diagnosis {
                        name: entry.name,
                        severity: entry.severity,
                        description: entry.description,
                    },
                )
            })
            .collect();

        Ok(Self { entries })
    }

    /// Load a label table from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SkinScanError::Config(format!("Failed to read label table {:?}: {}", path, e))
        })?;
        let table = Self::from_toml(&content)?;
        info!("Loaded {} labels from {:?}", table.len(), path);
        Ok(table)
    }

    /// Map a raw label. Total: unknown labels get the default branch.
    pub fn map(&self, raw_label: &str) -> Diagnosis {
        self.entries
            .get(raw_label)
            .cloned()
            .unwrap_or_else(|| Diagnosis::unknown(raw_label))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        default_table().clone()
    }
}

/// The embedded label table.
///
/// # Panics
/// Panics if the embedded TOML is invalid (a build-time bug).
pub fn default_table() -> &'static LabelTable {
    DEFAULT_TABLE.get_or_init(|| {
        LabelTable::from_toml(DEFAULT_LABELS).expect("embedded labels.toml must be valid TOML")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_table_has_five_labels() {
        assert_eq!(default_table().len(), 5);
    }

    #[test]
    fn test_custom_table_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("labels.toml");
        std::fs::write(
            &path,
            r#"
[[labels]]
label = "Burns"
name = "Burn"
severity = "Dangerous Wound"
description = "A burn detected."
"#,
        )
        .unwrap();

        let table = LabelTable::load(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.map("Burns").name, "Burn");

        // Default branch still applies to anything not listed
        let other = table.map("Bruises");
        assert_eq!(other.name, "Bruises");
        assert_eq!(other.severity, "Unknown");
    }

    #[test]
    fn test_invalid_table_is_config_error() {
        let result = LabelTable::from_toml("labels = 3");
        assert!(matches!(result, Err(SkinScanError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = LabelTable::load(Path::new("/nonexistent/labels.toml"));
        assert!(matches!(result, Err(SkinScanError::Config(_))));
    }
}
