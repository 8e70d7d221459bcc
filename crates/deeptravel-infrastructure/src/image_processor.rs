//! Image resize + JPEG compression for outgoing attachments.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use deeptravel_core::attachment::{Attachment, ImageProcessor};
use deeptravel_core::config::AttachmentConfig;
use deeptravel_core::error::{DeepTravelError, Result};
use image::GenericImageView;
use rand::Rng;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Resizes images so the longest side fits `max_dimension` (never upscaling)
/// and re-encodes them as JPEG into `output_dir`.
#[derive(Debug, Clone)]
pub struct JpegImageProcessor {
    output_dir: PathBuf,
    max_dimension: u32,
    quality: u8,
}

impl JpegImageProcessor {
    pub fn new(output_dir: PathBuf, config: &AttachmentConfig) -> Self {
        Self {
            output_dir,
            max_dimension: config.max_dimension.max(1),
            quality: config.effective_quality(),
        }
    }

    fn process_blocking(&self, source: &Path) -> Result<(PathBuf, Vec<u8>)> {
        let img = image::open(source).map_err(|e| {
            DeepTravelError::image(format!("Failed to decode {}: {}", source.display(), e))
        })?;

        let (w, h) = img.dimensions();
        let img = if w > self.max_dimension || h > self.max_dimension {
            tracing::debug!(
                "[ImageProcessor] Resizing {}x{} to fit within {}px",
                w,
                h,
                self.max_dimension
            );
            img.resize(
                self.max_dimension,
                self.max_dimension,
                image::imageops::FilterType::Lanczos3,
            )
        } else {
            img
        };

        // JPEG has no alpha channel
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let mut cursor = Cursor::new(Vec::new());
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, self.quality);
        encoder
            .encode(rgb.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .map_err(|e| DeepTravelError::image(format!("JPEG encoding failed: {}", e)))?;
        let bytes = cursor.into_inner();

        std::fs::create_dir_all(&self.output_dir)?;
        let dest = self.output_dir.join(output_file_name());
        std::fs::write(&dest, &bytes)?;

        Ok((dest, bytes))
    }
}

fn output_file_name() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let nonce: u32 = rand::thread_rng().r#gen();
    format!("img_{}_{:08x}.jpg", millis, nonce)
}

#[async_trait]
impl ImageProcessor for JpegImageProcessor {
    async fn process(&self, source: &Path) -> Result<Attachment> {
        let processor = self.clone();
        let source = source.to_path_buf();
        let (dest, bytes) = tokio::task::spawn_blocking(move || processor.process_blocking(&source))
            .await
            .map_err(|e| DeepTravelError::internal(format!("Failed to join task: {}", e)))??;

        tracing::info!(
            "[ImageProcessor] Stored attachment {} ({} bytes)",
            dest.display(),
            bytes.len()
        );

        Ok(Attachment {
            uri: dest.display().to_string(),
            base64: Some(BASE64.encode(&bytes)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 255]));
        img.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_large_image_is_downscaled_to_bound() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("wide.png");
        write_png(&source, 2000, 500);

        let processor = JpegImageProcessor::new(
            temp_dir.path().join("out"),
            &AttachmentConfig::default(),
        );
        let attachment = processor.process(&source).await.unwrap();

        let stored = image::open(&attachment.uri).unwrap();
        let (w, h) = stored.dimensions();
        assert_eq!(w, 1024);
        assert!(h <= 1024);

        let payload = BASE64.decode(attachment.base64.unwrap()).unwrap();
        assert_eq!(&payload[..2], &[0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn test_small_image_is_not_upscaled() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("small.png");
        write_png(&source, 320, 240);

        let processor = JpegImageProcessor::new(
            temp_dir.path().join("out"),
            &AttachmentConfig::default(),
        );
        let attachment = processor.process(&source).await.unwrap();

        assert_eq!(image::open(&attachment.uri).unwrap().dimensions(), (320, 240));
    }

    #[tokio::test]
    async fn test_undecodable_source_is_image_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("note.png");
        std::fs::write(&source, b"not an image").unwrap();

        let processor = JpegImageProcessor::new(
            temp_dir.path().join("out"),
            &AttachmentConfig::default(),
        );
        let err = processor.process(&source).await.unwrap_err();
        assert!(matches!(err, DeepTravelError::Image(_)));
    }
}
