use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::strip::ExifTool;

/// Where users can download ExifTool
pub const DOWNLOAD_URL: &str = "https://exiftool.org/";

/// Why a candidate path cannot be run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing there, or not a regular file
    Missing,
    /// A file without any execute permission bit
    NotExecutable,
}

/// ExifTool could not be found anywhere we looked
#[derive(Debug, Error)]
#[error("ExifTool not found (searched {} locations)", .searched.len())]
pub struct ToolNotFound {
    /// Every candidate path that was checked, in order
    pub searched: Vec<PathBuf>,
    /// Set when the user named a specific executable, with why it was rejected
    pub explicit: Option<Rejection>,
}

impl ToolNotFound {
    /// Multi-line message telling the user how to fix the problem
    pub fn remediation(&self) -> String {
        let mut message = format!(
            "ExifTool not found!\nPlease install ExifTool from:\n{}\n",
            DOWNLOAD_URL
        );

        if let Some(rejection) = self.explicit {
            let problem = match rejection {
                Rejection::Missing => "does not exist",
                Rejection::NotExecutable => "exists but is not executable",
            };
            if let Some(path) = self.searched.first() {
                message.push_str(&format!(
                    "\nThe path given with --exiftool {}:\n{}\n",
                    problem,
                    path.display()
                ));
            }
        } else {
            message.push_str(
                "\nMake sure it is on your PATH, or pass its location with --exiftool <PATH>.\n",
            );
            if !self.searched.is_empty() {
                message.push_str("\nSearched:\n");
                for path in &self.searched {
                    message.push_str(&format!("  {}\n", path.display()));
                }
            }
        }

        message
    }
}

/// Resolve the ExifTool executable.
///
/// An explicit path wins and is never second-guessed; it must be an
/// executable file, exactly like every searched candidate. Without one, every
/// `PATH` entry is searched, then a handful of well-known install locations.
pub fn locate(explicit: Option<&Path>) -> Result<ExifTool, ToolNotFound> {
    let path_var = env::var_os("PATH");
    let path = locate_with(explicit, path_var.as_deref(), &well_known_locations())?;

    info!("Using ExifTool at {}", path.display());
    Ok(ExifTool::new(path))
}

/// Search logic with the environment passed in
fn locate_with(
    explicit: Option<&Path>,
    path_var: Option<&OsStr>,
    fallbacks: &[PathBuf],
) -> Result<PathBuf, ToolNotFound> {
    if let Some(path) = explicit {
        debug!("Checking explicit ExifTool path {}", path.display());
        return match check_executable(path) {
            Ok(()) => Ok(path.to_path_buf()),
            Err(rejection) => Err(ToolNotFound {
                searched: vec![path.to_path_buf()],
                explicit: Some(rejection),
            }),
        };
    }

    let mut searched = Vec::new();

    let on_path = path_var
        .map(|paths| env::split_paths(paths).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| executable_names().iter().map(move |name| dir.join(name)));

    for candidate in on_path.chain(fallbacks.iter().cloned()) {
        if check_executable(&candidate).is_ok() {
            return Ok(candidate);
        }
        searched.push(candidate);
    }

    Err(ToolNotFound {
        searched,
        explicit: None,
    })
}

/// File names ExifTool is installed under on this platform
fn executable_names() -> &'static [&'static str] {
    if cfg!(windows) {
        &["exiftool.exe", "exiftool"]
    } else {
        &["exiftool"]
    }
}

/// Install locations checked when ExifTool is not on PATH
fn well_known_locations() -> Vec<PathBuf> {
    let mut locations: Vec<PathBuf> = if cfg!(windows) {
        vec![PathBuf::from(r"C:\Program Files\ExifTool\exiftool.exe")]
    } else {
        ["/usr/local/bin", "/opt/homebrew/bin", "/usr/bin"]
            .iter()
            .map(|dir| Path::new(dir).join("exiftool"))
            .collect()
    };

    if let Some(dir) = dirs::executable_dir() {
        locations.extend(executable_names().iter().map(|name| dir.join(name)));
    }

    locations
}

#[cfg(unix)]
fn check_executable(path: &Path) -> Result<(), Rejection> {
    use std::os::unix::fs::PermissionsExt;

    match path.metadata() {
        Ok(meta) if meta.is_file() => {
            if meta.permissions().mode() & 0o111 != 0 {
                Ok(())
            } else {
                Err(Rejection::NotExecutable)
            }
        }
        _ => Err(Rejection::Missing),
    }
}

#[cfg(not(unix))]
fn check_executable(path: &Path) -> Result<(), Rejection> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Rejection::Missing)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn fake_tool(dir: &Path) -> PathBuf {
        let path = dir.join("exiftool");
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_explicit_path_wins() {
        let on_path = TempDir::new().unwrap();
        let custom = TempDir::new().unwrap();
        fake_tool(on_path.path());
        let expected = fake_tool(custom.path());

        let path_var = env::join_paths([on_path.path()]).unwrap();
        let found = locate_with(Some(expected.as_path()), Some(path_var.as_os_str()), &[]).unwrap();

        assert_eq!(found, expected);
    }

    #[test]
    fn test_missing_explicit_path_does_not_fall_back() {
        let on_path = TempDir::new().unwrap();
        fake_tool(on_path.path());
        let missing = on_path.path().join("nope").join("exiftool");

        let path_var = env::join_paths([on_path.path()]).unwrap();
        let err = locate_with(Some(missing.as_path()), Some(path_var.as_os_str()), &[]).unwrap_err();

        assert_eq!(err.explicit, Some(Rejection::Missing));
        assert_eq!(err.searched, vec![missing.clone()]);
        assert!(err.remediation().contains("--exiftool does not exist"));
    }

    #[test]
    fn test_explicit_path_without_execute_bit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exiftool");
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let err = locate_with(Some(path.as_path()), None, &[]).unwrap_err();

        assert_eq!(err.explicit, Some(Rejection::NotExecutable));
        let message = err.remediation();
        assert!(message.contains("--exiftool exists but is not executable"));
        assert!(!message.contains("does not exist"));
    }

    #[test]
    fn test_explicit_directory_counts_as_missing() {
        let dir = TempDir::new().unwrap();

        let err = locate_with(Some(dir.path()), None, &[]).unwrap_err();

        assert_eq!(err.explicit, Some(Rejection::Missing));
    }

    #[test]
    fn test_found_on_path() {
        let empty = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        let expected = fake_tool(bin.path());

        let path_var = env::join_paths([empty.path(), bin.path()]).unwrap();
        let found = locate_with(None, Some(path_var.as_os_str()), &[]).unwrap();

        assert_eq!(found, expected);
    }

    #[test]
    fn test_falls_back_to_known_locations() {
        let empty = TempDir::new().unwrap();
        let install = TempDir::new().unwrap();
        let expected = fake_tool(install.path());

        let path_var = env::join_paths([empty.path()]).unwrap();
        let found = locate_with(None, Some(path_var.as_os_str()), &[expected.clone()]).unwrap();

        assert_eq!(found, expected);
    }

    #[test]
    fn test_non_executable_file_is_skipped() {
        let bin = TempDir::new().unwrap();
        let path = bin.path().join("exiftool");
        fs::write(&path, "not a program").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let path_var = env::join_paths([bin.path()]).unwrap();
        let err = locate_with(None, Some(path_var.as_os_str()), &[]).unwrap_err();

        assert_eq!(err.searched, vec![path]);
    }

    #[test]
    fn test_not_found_lists_searched_locations() {
        let empty = TempDir::new().unwrap();
        let fallback = empty.path().join("opt").join("exiftool");

        let path_var = env::join_paths([empty.path()]).unwrap();
        let err = locate_with(None, Some(path_var.as_os_str()), &[fallback.clone()]).unwrap_err();

        assert_eq!(err.explicit, None);
        assert_eq!(err.searched, vec![empty.path().join("exiftool"), fallback.clone()]);

        let message = err.remediation();
        assert!(message.contains(DOWNLOAD_URL));
        assert!(message.contains(&fallback.display().to_string()));
    }

    #[test]
    fn test_no_path_variable() {
        let err = locate_with(None, None, &[]).unwrap_err();
        assert!(err.searched.is_empty());
    }
}
