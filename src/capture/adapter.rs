use std::sync::Arc;

use tracing::info;

use super::camera::CaptureDevice;
use super::permissions::PermissionBroker;
use super::picker::MediaPicker;
use super::types::{Capability, ImageRef, PermissionStatus, SourceOutcome};
use crate::error::{Result, SkinScanError};

/// Normalizes camera captures and library picks into `ImageRef`s.
pub struct ImageSourceAdapter {
    permissions: Arc<dyn PermissionBroker>,
    camera: Box<dyn CaptureDevice>,
    picker: Box<dyn MediaPicker>,
}

impl ImageSourceAdapter {
    pub fn new(
        permissions: Arc<dyn PermissionBroker>,
        camera: Box<dyn CaptureDevice>,
        picker: Box<dyn MediaPicker>,
    ) -> Self {
        Self {
            permissions,
            camera,
            picker,
        }
    }

    fn ensure(&self, capability: Capability) -> Result<()> {
        match self.permissions.request(capability) {
            PermissionStatus::Granted => Ok(()),
            _ => Err(SkinScanError::PermissionDenied(capability)),
        }
    }

    /// Take a photo with the capture device.
    pub fn capture_from_device(&self) -> Result<ImageRef> {
        self.ensure(Capability::Camera)?;
        let path = self.camera.capture()?;
        let image = ImageRef::from_path(&path)?;
        info!("Captured {}", image.uri);
        Ok(image)
    }

    /// Let the user choose a photo from the library.
    pub fn pick_from_library(&self) -> Result<SourceOutcome> {
        self.ensure(Capability::MediaLibrary)?;
        match self.picker.pick()? {
            Some(path) => Ok(SourceOutcome::Selected(ImageRef::from_path(&path)?)),
            None => Ok(SourceOutcome::Cancelled),
        }
    }
}
