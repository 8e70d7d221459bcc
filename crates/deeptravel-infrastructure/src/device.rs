//! Host-side device providers.
//!
//! On a desktop host there is no camera or GPS; images and positions are
//! supplied up front (for example from command-line arguments).

use async_trait::async_trait;
use deeptravel_core::attachment::{GeoFix, ImageSource, LocationProvider, PermissionStatus};
use deeptravel_core::error::{DeepTravelError, Result};
use std::path::PathBuf;

/// [`ImageSource`] serving pre-selected files.
///
/// The camera is "granted" only when a photo file was supplied.
#[derive(Debug, Clone, Default)]
pub struct FileImageSource {
    photo: Option<PathBuf>,
    library: Vec<PathBuf>,
}

impl FileImageSource {
    pub fn new(photo: Option<PathBuf>, library: Vec<PathBuf>) -> Self {
        Self { photo, library }
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn request_camera_permission(&self) -> Result<PermissionStatus> {
        Ok(if self.photo.is_some() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        })
    }

    async fn capture_photo(&self) -> Result<Option<PathBuf>> {
        Ok(self.photo.clone())
    }

    async fn request_library_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn pick_from_library(&self, limit: usize) -> Result<Vec<PathBuf>> {
        if let Some(missing) = self.library.iter().find(|path| !path.exists()) {
            return Err(DeepTravelError::not_found("image", missing.display().to_string()));
        }
        if self.library.len() > limit {
            tracing::warn!(
                "[FileImageSource] {} images selected, keeping the first {}",
                self.library.len(),
                limit
            );
        }
        Ok(self.library.iter().take(limit).cloned().collect())
    }
}

/// [`LocationProvider`] returning a fixed position, or denying permission
/// when none was given.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocationProvider {
    fix: Option<GeoFix>,
}

impl FixedLocationProvider {
    pub fn new(fix: Option<GeoFix>) -> Self {
        Self { fix }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(if self.fix.is_some() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        })
    }

    async fn current_position(&self) -> Result<GeoFix> {
        self.fix
            .ok_or_else(|| DeepTravelError::not_found("location", "current position"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_library_selection_is_capped() {
        let temp_dir = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..3)
            .map(|i| {
                let path = temp_dir.path().join(format!("{i}.jpg"));
                std::fs::write(&path, b"x").unwrap();
                path
            })
            .collect();

        let source = FileImageSource::new(None, paths.clone());
        assert_eq!(source.pick_from_library(2).await.unwrap(), paths[..2].to_vec());
        assert_eq!(
            source.request_camera_permission().await.unwrap(),
            PermissionStatus::Denied
        );
    }

    #[tokio::test]
    async fn test_missing_library_file_is_not_found() {
        let source = FileImageSource::new(None, vec![PathBuf::from("/nonexistent/x.jpg")]);
        assert!(source.pick_from_library(10).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_fixed_location() {
        let provider = FixedLocationProvider::new(None);
        assert!(!provider.request_permission().await.unwrap().is_granted());

        let fix = GeoFix {
            latitude: 35.0,
            longitude: 135.7,
            accuracy: None,
        };
        let provider = FixedLocationProvider::new(Some(fix));
        assert_eq!(provider.current_position().await.unwrap(), fix);
    }
}
