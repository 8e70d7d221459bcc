use deeptravel_core::attachment::{Attachment, ImageProcessor, ImageSource};
use deeptravel_core::error::{DeepTravelError, Result};
use std::path::PathBuf;
use std::sync::Arc;

use super::session::ChatSession;

/// Camera and photo-library intake.
///
/// Each capture or selection first clears the session's pending
/// attachments, then resizes and compresses the chosen images. Results
/// arriving after the session moved on are dropped.
pub struct AttachmentPipeline {
    source: Arc<dyn ImageSource>,
    processor: Arc<dyn ImageProcessor>,
    max_selection: usize,
}

impl AttachmentPipeline {
    pub fn new(
        source: Arc<dyn ImageSource>,
        processor: Arc<dyn ImageProcessor>,
        max_selection: usize,
    ) -> Self {
        Self {
            source,
            processor,
            max_selection: max_selection.max(1),
        }
    }

    /// Takes one photo. Returns the number of attachments added; a cancelled
    /// capture adds none.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` when camera access is not granted.
    pub async fn capture(&self, session: &ChatSession) -> Result<usize> {
        let token = session.begin_attachment_request();

        if !self.source.request_camera_permission().await?.is_granted() {
            tracing::info!("[AttachmentPipeline] Camera permission denied");
            return Err(DeepTravelError::permission_denied("camera"));
        }

        let Some(path) = self.source.capture_photo().await? else {
            tracing::debug!("[AttachmentPipeline] Capture cancelled");
            return Ok(0);
        };

        let attachments = self.process_all(vec![path]).await;
        Ok(session.accept_attachments(token, attachments))
    }

    /// Picks up to `max_selection` images from the library.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` when library access is not granted.
    pub async fn pick(&self, session: &ChatSession) -> Result<usize> {
        let token = session.begin_attachment_request();

        if !self.source.request_library_permission().await?.is_granted() {
            tracing::info!("[AttachmentPipeline] Photo library permission denied");
            return Err(DeepTravelError::permission_denied("photo library"));
        }

        let mut paths = self.source.pick_from_library(self.max_selection).await?;
        paths.truncate(self.max_selection);

        let attachments = self.process_all(paths).await;
        Ok(session.accept_attachments(token, attachments))
    }

    /// Images that fail to process are skipped.
    async fn process_all(&self, paths: Vec<PathBuf>) -> Vec<Attachment> {
        let mut attachments = Vec::with_capacity(paths.len());
        for path in paths {
            match self.processor.process(&path).await {
                Ok(attachment) => attachments.push(attachment),
                Err(e) => {
                    tracing::warn!(
                        "[AttachmentPipeline] Skipping {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }
        attachments
    }
}
