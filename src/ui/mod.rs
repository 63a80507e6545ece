/// User interface module
///
/// The window is two panes side by side: controls on the left, the image
/// preview on the right.

pub mod panes;

pub use panes::{controls, preview, PANE_GAP, WINDOW_HEIGHT, WINDOW_WIDTH};
