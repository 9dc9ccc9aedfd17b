use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use crate::error::{Result, SkinScanError};

/// Placeholder in the capture command replaced by the output file path.
const OUTPUT_PLACEHOLDER: &str = "{output}";

/// A device that can take a photo and leave it on local storage.
pub trait CaptureDevice: Send + Sync {
    /// Take one photo and return the path of the written image file.
    fn capture(&self) -> Result<PathBuf>;
}

/// Captures by running an external program (e.g. `fswebcam`) that writes a
/// photo to the path substituted for `{output}`.
#[derive(Debug, Clone)]
pub struct CommandCamera {
    argv: Vec<String>,
    output_dir: PathBuf,
}

impl CommandCamera {
    pub fn new(argv: Vec<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            argv,
            output_dir: output_dir.into(),
        }
    }

    fn reserve_output(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            SkinScanError::CaptureFailed(format!(
                "Failed to create capture dir {:?}: {}",
                self.output_dir, e
            ))
        })?;

        let temp = tempfile::Builder::new()
            .prefix("capture-")
            .suffix(".jpg")
            .tempfile_in(&self.output_dir)
            .map_err(|e| SkinScanError::CaptureFailed(format!("Failed to reserve file: {}", e)))?;

        temp.into_temp_path()
            .keep()
            .map_err(|e| SkinScanError::CaptureFailed(format!("Failed to keep file: {}", e)))
    }

    fn build_command(&self, output: &Path) -> Result<Command> {
        let (program, args) = self.argv.split_first().ok_or_else(|| {
            SkinScanError::CaptureFailed("No camera command configured".to_string())
        })?;

        let output = output.to_string_lossy();
        let mut cmd = Command::new(program);
        for arg in args {
            cmd.arg(arg.replace(OUTPUT_PLACEHOLDER, &output));
        }
        Ok(cmd)
    }

    fn run(&self, output: &Path) -> Result<()> {
        let mut cmd = self.build_command(output)?;
        info!("Capturing photo with {:?}", cmd.get_program());

        let result = cmd.output().map_err(|e| {
            SkinScanError::CaptureFailed(format!("Failed to start camera command: {}", e))
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            warn!("Camera command exited with {}: {}", result.status, stderr.trim());
            return Err(SkinScanError::CaptureFailed(format!(
                "Camera command exited with {}",
                result.status
            )));
        }

        let size = std::fs::metadata(output).map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            return Err(SkinScanError::CaptureFailed(
                "Camera produced no image".to_string(),
            ));
        }

        info!("Captured {} bytes to {:?}", size, output);
        Ok(())
    }
}

impl CaptureDevice for CommandCamera {
    fn capture(&self) -> Result<PathBuf> {
        let output = self.reserve_output()?;
        let result = self.run(&output);
        if result.is_err() {
            let _ = std::fs::remove_file(&output);
        }
        result.map(|_| output)
    }
}
