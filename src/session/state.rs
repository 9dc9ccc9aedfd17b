use crate::capture::{ImageRef, SourceKind};
use crate::history::ScanRecord;

use super::alert::Alert;

/// Where a scan session currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Waiting for the user to choose camera or library
    Idle,
    /// A permission request or capture/pick is in flight
    Capturing(SourceKind),
    /// Photo acquired, waiting for "use" or "discard"
    Reviewing(ImageRef),
    /// Encoding, classification and history append in flight
    Classifying(ImageRef),
    ShowingResult(ScanRecord),
    Failed(Alert),
}

impl ScanState {
    pub fn name(&self) -> &'static str {
        match self {
            ScanState::Idle => "idle",
            ScanState::Capturing(_) => "capturing",
            ScanState::Reviewing(_) => "reviewing",
            ScanState::Classifying(_) => "classifying",
            ScanState::ShowingResult(_) => "showing a result",
            ScanState::Failed(_) => "showing a failure",
        }
    }
}
