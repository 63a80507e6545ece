/// Command-line configuration
///
/// Nothing is persisted; every setting comes from flags and is resolved once
/// at startup.
use clap::Parser;
use std::path::PathBuf;

use crate::imaging::preview::DEFAULT_PREVIEW_SIZE;
use crate::ui::panes::MAX_PREVIEW_SIZE;

/// Preview an image and strip its embedded metadata with ExifTool.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "metadata-remover")]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    /// Image to open at startup
    pub file: Option<PathBuf>,

    /// ExifTool executable to use instead of searching PATH
    #[arg(long, value_name = "PATH")]
    pub exiftool: Option<PathBuf>,

    /// Keep ExifTool's <file>_original backup instead of overwriting in place
    #[arg(long)]
    pub backup: bool,

    /// Edge length of the square preview box, in pixels (at most 460, the
    /// room left beside the controls in the fixed window)
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_PREVIEW_SIZE,
          value_parser = clap::value_parser!(u32).range(1..=MAX_PREVIEW_SIZE as i64))]
    pub preview_size: u32,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
