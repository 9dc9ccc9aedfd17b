//! Image acquisition from a capture device or a media library.
//!
//! Both paths produce the same `ImageRef { uri }`. Each checks its
//! capability through a `PermissionBroker` first and fails with
//! `PermissionDenied` when the user refuses.

mod adapter;
mod camera;
mod permissions;
mod picker;
mod types;

pub(crate) use types::to_local_path;

pub use adapter::ImageSourceAdapter;
pub use camera::{CaptureDevice, CommandCamera};
pub use permissions::{PermissionBroker, StoredPermissions, PERMISSIONS_KEY};
pub use picker::{MediaPicker, PathPicker};
pub use types::*;
