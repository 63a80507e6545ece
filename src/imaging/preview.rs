/// Preview generation from image files on disk
/// Decodes the file, fits it into the preview box and wraps it for display
use iced::widget::image::Handle;
use image::ImageReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::scale::scale_to_fit;

/// Edge length of the default square preview box, in pixels
pub const DEFAULT_PREVIEW_SIZE: u32 = 450;

/// Why a preview could not be built
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A decoded, scaled snapshot of an image file, ready for the image widget
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    /// RGBA pixels uploaded once to the renderer
    pub handle: Handle,
}

/// Builds previews that fit a fixed bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewScaler {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for PreviewScaler {
    fn default() -> Self {
        Self::square(DEFAULT_PREVIEW_SIZE)
    }
}

impl PreviewScaler {
    /// A scaler for a `size` x `size` preview box
    pub fn square(size: u32) -> Self {
        Self {
            max_width: size,
            max_height: size,
        }
    }

    /// Decode `path` and scale it to the preview box.
    ///
    /// The format is sniffed from the file contents, falling back to the
    /// extension, so a mislabeled file still previews.
    pub fn load(&self, path: &Path) -> Result<PreviewImage, DecodeError> {
        let reader = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|source| DecodeError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let decoded = reader.decode().map_err(|source| DecodeError::Image {
            path: path.to_path_buf(),
            source,
        })?;

        let scaled = scale_to_fit(&decoded, self.max_width, self.max_height).into_rgba8();
        let (width, height) = scaled.dimensions();

        debug!(
            "Preview for {}: {}x{} -> {}x{}",
            path.display(),
            decoded.width(),
            decoded.height(),
            width,
            height
        );

        Ok(PreviewImage {
            width,
            height,
            handle: Handle::from_rgba(width, height, scaled.into_raw()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.path().join(name);
        RgbImage::from_pixel(width, height, Rgb([200, 40, 40]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_load_wide_png() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "wide.png", 800, 400);

        let preview = PreviewScaler::default().load(&path).unwrap();

        assert_eq!((preview.width, preview.height), (450, 225));
    }

    #[test]
    fn test_load_respects_custom_box() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "tall.png", 300, 900);

        let preview = PreviewScaler::square(300).load(&path).unwrap();

        assert_eq!((preview.width, preview.height), (100, 300));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.jpg");

        let err = PreviewScaler::default().load(&path).unwrap_err();

        assert!(matches!(err, DecodeError::Io { .. }));
        assert!(err.to_string().contains("missing.jpg"));
    }

    #[test]
    fn test_zero_byte_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();

        assert!(PreviewScaler::default().load(&path).is_err());
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrupt.png");
        // PNG signature followed by garbage
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(b"definitely not chunks");
        std::fs::write(&path, bytes).unwrap();

        let err = PreviewScaler::default().load(&path).unwrap_err();

        assert!(matches!(err, DecodeError::Image { .. }));
    }

    #[test]
    fn test_mislabeled_file_sniffs_format() {
        let dir = TempDir::new().unwrap();
        let png = write_png(&dir, "real.png", 100, 100);
        let renamed = dir.path().join("actually-png.jpg");
        std::fs::rename(&png, &renamed).unwrap();

        let preview = PreviewScaler::default().load(&renamed).unwrap();

        assert_eq!((preview.width, preview.height), (450, 450));
    }
}
