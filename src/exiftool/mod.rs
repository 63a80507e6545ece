/// ExifTool adapter module
///
/// This module handles:
/// - Finding the ExifTool executable once at startup (locate.rs)
/// - Running it to strip all metadata from a file (strip.rs)

pub mod locate;
pub mod strip;

pub use locate::locate;
pub use strip::{ExifTool, StripError};
