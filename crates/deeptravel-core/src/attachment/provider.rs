//! Device collaborators: image sources, image processing and location.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::model::{Attachment, GeoFix, PermissionStatus};
use crate::error::Result;

/// Camera and photo library access.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn request_camera_permission(&self) -> Result<PermissionStatus>;

    /// Takes one photo. `Ok(None)` means the user cancelled.
    async fn capture_photo(&self) -> Result<Option<PathBuf>>;

    async fn request_library_permission(&self) -> Result<PermissionStatus>;

    /// Lets the user pick up to `limit` images. An empty list means cancelled.
    async fn pick_from_library(&self, limit: usize) -> Result<Vec<PathBuf>>;
}

/// Turns a raw image into a sendable [`Attachment`].
#[async_trait]
pub trait ImageProcessor: Send + Sync {
    /// Resizes `source` so its longest side fits the configured bound and
    /// re-encodes it at the configured quality.
    async fn process(&self, source: &Path) -> Result<Attachment>;
}

/// Foreground GPS access.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> Result<PermissionStatus>;

    async fn current_position(&self) -> Result<GeoFix>;
}
