//! Label table and diagnosis types.

use serde::{Deserialize, Serialize};

/// Severity assigned to labels outside the vocabulary.
pub const UNKNOWN_SEVERITY: &str = "Unknown";

/// Description assigned to labels outside the vocabulary.
pub const UNKNOWN_DESCRIPTION: &str = "No detailed description available.";

/// Display record derived from a raw classifier label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub name: String,
    pub severity: String,
    pub description: String,
}

impl Diagnosis {
    pub(crate) fn unknown(raw_label: &str) -> Self {
        Self {
            name: raw_label.to_string(),
            severity: UNKNOWN_SEVERITY.to_string(),
            description: UNKNOWN_DESCRIPTION.to_string(),
        }
    }
}

/// Root of a label table TOML document.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelTableConfig {
    pub labels: Vec<LabelEntry>,
}

/// One row of the label table.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelEntry {
    /// Raw classifier label, matched exactly
    pub label: String,
    pub name: String,
    pub severity: String,
    pub description: String,
}

/// Coarse severity tiers used for ordering and badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    None,
    Normal,
    Moderate,
    Dangerous,
    Unknown,
}

impl SeverityTier {
    /// Classify a stored severity string. Anything unrecognised is `Unknown`.
    pub fn from_severity(severity: &str) -> Self {
        match severity {
            "No severity" => SeverityTier::None,
            "Normal Wound" => SeverityTier::Normal,
            "Moderate Wound" => SeverityTier::Moderate,
            "Dangerous Wound" => SeverityTier::Dangerous,
            _ => SeverityTier::Unknown,
        }
    }

    /// Short badge text for list and detail views.
    pub fn badge(&self) -> &'static str {
        match self {
            SeverityTier::None => "OK",
            SeverityTier::Normal => "LOW",
            SeverityTier::Moderate => "MED",
            SeverityTier::Dangerous => "HIGH",
            SeverityTier::Unknown => "?",
        }
    }

    /// Whether the user should be urged to seek care.
    pub fn needs_attention(&self) -> bool {
        matches!(self, SeverityTier::Dangerous)
    }
}
