/// Preview imaging module
///
/// This module handles:
/// - Fitting an image into the preview box while keeping its aspect ratio
/// - Decoding images from disk into display-ready previews

pub mod scale;
pub mod preview;

pub use preview::{DecodeError, PreviewImage, PreviewScaler};
