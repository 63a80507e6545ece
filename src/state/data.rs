/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the adapters and the UI layer.
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::exiftool::StripError;

/// Message shown after ExifTool succeeds
pub const SUCCESS_MESSAGE: &str = "Metadata successfully removed!";

/// Where the shell is in its select / remove cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Nothing chosen yet; removal is disabled
    #[default]
    Empty,
    /// A file is chosen and previewed; status is clear
    Selected,
    /// At least one removal ran on the current file
    Processed,
}

/// The image the user picked, as an absolute path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile(PathBuf);

impl SelectedFile {
    /// Relative paths (e.g. from the command line) are made absolute
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self(std::path::absolute(&path).unwrap_or(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Outcome of the last user-visible operation, shown in the status label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failure; the text is prefixed with "Error: " and loses trailing
    /// whitespace so the status label does not end in a blank line
    pub fn failure(detail: impl fmt::Display) -> Self {
        let detail = detail.to_string();
        Self {
            success: false,
            message: format!("Error: {}", detail.trim_end()),
        }
    }
}

impl From<Result<(), StripError>> for OperationResult {
    fn from(result: Result<(), StripError>) -> Self {
        match result {
            Ok(()) => Self::success(SUCCESS_MESSAGE),
            Err(StripError::ProcessFailure { code, diagnostic }) => {
                debug!("ExifTool exit code {:?}", code);
                Self::failure(diagnostic)
            }
            Err(err) => Self::failure(err),
        }
    }
}
