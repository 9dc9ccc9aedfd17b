use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::error::{Result, SkinScanError};
use crate::prompt::Prompter;

/// Lets the user choose an existing photo.
pub trait MediaPicker: Send + Sync {
    /// `Ok(None)` when the user cancels the selection.
    fn pick(&self) -> Result<Option<PathBuf>>;
}

/// Picks a file path, either fixed up front or typed in at the prompt.
pub struct PathPicker {
    preselected: Option<PathBuf>,
    prompter: Arc<dyn Prompter>,
}

impl PathPicker {
    pub fn new(preselected: Option<PathBuf>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            preselected,
            prompter,
        }
    }
}

impl MediaPicker for PathPicker {
    fn pick(&self) -> Result<Option<PathBuf>> {
        let path = match &self.preselected {
            Some(path) => path.clone(),
            None => match self.prompter.ask("Path to photo (empty to cancel):") {
                Some(answer) => PathBuf::from(answer),
                None => {
                    info!("Photo selection cancelled");
                    return Ok(None);
                }
            },
        };

        if !path.is_file() {
            return Err(SkinScanError::CaptureFailed(format!(
                "No photo at {:?}",
                path
            )));
        }

        info!("Selected photo {:?}", path);
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use tempfile::TempDir;

    #[test]
    fn test_preselected_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, b"png").unwrap();

        let picker = PathPicker::new(Some(path.clone()), Arc::new(ScriptedPrompter::new()));
        assert_eq!(picker.pick().unwrap(), Some(path));
    }

    #[test]
    fn test_prompted_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("b.jpg");
        std::fs::write(&path, b"jpg").unwrap();

        let prompter = ScriptedPrompter::new().with_answers([Some(path.to_string_lossy().to_string())]);
        let picker = PathPicker::new(None, Arc::new(prompter));
        assert_eq!(picker.pick().unwrap(), Some(path));
    }

    #[test]
    fn test_empty_answer_cancels() {
        let picker = PathPicker::new(None, Arc::new(ScriptedPrompter::new()));
        assert_eq!(picker.pick().unwrap(), None);
    }

    #[test]
    fn test_missing_file_fails() {
        let picker = PathPicker::new(
            Some(PathBuf::from("/nonexistent/c.jpg")),
            Arc::new(ScriptedPrompter::new()),
        );
        assert!(matches!(picker.pick(), Err(SkinScanError::CaptureFailed(_))));
    }
}
