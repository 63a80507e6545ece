use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::data::{OperationResult, SelectedFile, Stage};
use crate::exiftool::{ExifTool, StripError};
use crate::imaging::{DecodeError, PreviewImage, PreviewScaler};

/// Something that can strip metadata from a file on disk
pub trait Stripper {
    fn strip_metadata(&self, file: &Path) -> Result<(), StripError>;
}

impl Stripper for ExifTool {
    fn strip_metadata(&self, file: &Path) -> Result<(), StripError> {
        ExifTool::strip_metadata(self, file)
    }
}

/// Something that can turn a file on disk into a preview
pub trait PreviewLoader {
    fn load_preview(&self, file: &Path) -> Result<PreviewImage, DecodeError>;
}

impl PreviewLoader for PreviewScaler {
    fn load_preview(&self, file: &Path) -> Result<PreviewImage, DecodeError> {
        self.load(file)
    }
}

/// Everything the window shows, and the transitions between stages.
///
/// The preview is a snapshot of the file at the time it was rendered and is
/// only rebuilt on selection and after a removal attempt.
#[derive(Debug, Default)]
pub struct Session {
    stage: Stage,
    selected: Option<SelectedFile>,
    preview: Option<PreviewImage>,
    /// Why the current preview is missing, if loading failed
    preview_error: Option<String>,
    status: Option<OperationResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }

    pub fn preview_error(&self) -> Option<&str> {
        self.preview_error.as_deref()
    }

    pub fn status(&self) -> Option<&OperationResult> {
        self.status.as_ref()
    }

    /// Removal is only offered once a file has been chosen
    pub fn can_remove(&self) -> bool {
        self.stage() != Stage::Empty
    }

    /// The user picked a file. Clears the status and renders a new preview.
    ///
    /// A file that fails to decode still becomes the selection; the status
    /// explains the failure.
    pub fn select(&mut self, path: impl Into<PathBuf>, loader: &impl PreviewLoader) {
        let file = SelectedFile::new(path);
        info!("Selected {}", file);

        self.selected = Some(file);
        self.stage = Stage::Selected;
        self.status = None;

        if let Err(err) = self.refresh_preview(loader) {
            self.status = Some(OperationResult::failure(format!(
                "Failed to load image: {}",
                err
            )));
        }
    }

    /// Run the stripper on the selected file, then re-render the preview
    /// whatever the outcome.
    ///
    /// Returns the outcome, or `None` when nothing is selected.
    pub fn remove_metadata(
        &mut self,
        stripper: &impl Stripper,
        loader: &impl PreviewLoader,
    ) -> Option<&OperationResult> {
        let Some(file) = self.selected.clone() else {
            warn!("Remove requested with no file selected");
            return None;
        };

        let result = OperationResult::from(stripper.strip_metadata(file.path()));
        if result.success {
            info!("Metadata removed from {}", file);
        }

        self.stage = Stage::Processed;
        self.status = Some(result);

        // A failed refresh only shows in the preview pane; the status keeps
        // the removal outcome.
        let _ = self.refresh_preview(loader);

        self.status.as_ref()
    }

    /// Replace the preview with a fresh render of the selected file
    fn refresh_preview(&mut self, loader: &impl PreviewLoader) -> Result<(), DecodeError> {
        let Some(file) = &self.selected else {
            return Ok(());
        };

        self.preview = None;
        self.preview_error = None;

        match loader.load_preview(file.path()) {
            Ok(preview) => {
                self.preview = Some(preview);
                Ok(())
            }
            Err(err) => {
                warn!("Failed to load preview: {}", err);
                self.preview_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
