use serde::{Deserialize, Serialize};

use crate::labels::Diagnosis;

/// One stored scan result. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Unique within the history (creation time in milliseconds)
    pub id: String,
    /// Reference to the captured image; the record holds no image bytes
    pub uri: String,
    pub name: String,
    pub severity: String,
    pub description: String,
    /// Capture date, `YYYY-MM-DD`
    pub date: String,
}

impl ScanRecord {
    pub fn new(id: String, uri: String, diagnosis: Diagnosis, date: String) -> Self {
        Self {
            id,
            uri,
            name: diagnosis.name,
            severity: diagnosis.severity,
            description: diagnosis.description,
            date,
        }
    }

    /// Whether the record counts as a healthy result in the summary.
    pub fn is_healthy(&self) -> bool {
        let name = self.name.trim().to_lowercase();
        name.contains("healthy") || name.contains("normal")
    }
}

/// Aggregate view of the history for the profile summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistorySummary {
    pub total: usize,
    pub healthy: usize,
    pub diagnosed: usize,
    /// Most recent scan by date
    pub latest: Option<ScanRecord>,
    /// Up to two most recent scans, newest first
    pub recent: Vec<ScanRecord>,
}
