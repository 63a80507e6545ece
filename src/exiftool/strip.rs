use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Ways a metadata removal run can fail
#[derive(Debug, Error)]
pub enum StripError {
    /// ExifTool ran and exited non-zero; carries its diagnostics verbatim
    #[error("{diagnostic}")]
    ProcessFailure {
        code: Option<i32>,
        diagnostic: String,
    },
    /// ExifTool could not be started at all
    #[error("{0}")]
    InvocationError(#[from] std::io::Error),
}

/// A resolved ExifTool executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifTool {
    path: PathBuf,
    keep_backup: bool,
}

impl ExifTool {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            keep_backup: false,
        }
    }

    /// Keep ExifTool's `<file>_original` copy instead of overwriting in place
    pub fn keep_backup(mut self, keep_backup: bool) -> Self {
        self.keep_backup = keep_backup;
        self
    }

    pub fn keeps_backup(&self) -> bool {
        self.keep_backup
    }

    /// Build the command that erases every tag from `file`
    fn command(&self, file: &Path) -> Command {
        let mut command = Command::new(&self.path);
        command.arg("-all=");
        if !self.keep_backup {
            command.arg("-overwrite_original");
        }
        command.arg(file);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            // CREATE_NO_WINDOW: no console flash from a GUI process
            command.creation_flags(0x0800_0000);
        }

        command
    }

    /// Remove all metadata from `file`, rewriting it on disk.
    ///
    /// Blocks until ExifTool exits.
    pub fn strip_metadata(&self, file: &Path) -> Result<(), StripError> {
        info!("Stripping metadata from {}", file.display());

        let output = self.command(file).output()?;

        if output.status.success() {
            debug!(
                "ExifTool: {}",
                String::from_utf8_lossy(&output.stdout).trim_end()
            );
            return Ok(());
        }

        let mut diagnostic = String::from_utf8_lossy(&output.stderr).into_owned();
        if diagnostic.trim().is_empty() {
            diagnostic = format!("ExifTool exited with {}", output.status);
        }

        let code = output.status.code();
        warn!(
            "ExifTool failed on {} (exit code {:?}): {}",
            file.display(),
            code,
            diagnostic.trim_end()
        );

        Err(StripError::ProcessFailure { code, diagnostic })
    }
}
