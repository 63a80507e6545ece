use clap::Parser;
use iced::widget::row;
use iced::{Element, Size, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod exiftool;
mod imaging;
mod state;
mod ui;

use config::Settings;
use exiftool::locate::ToolNotFound;
use exiftool::ExifTool;
use imaging::PreviewScaler;
use state::Session;

/// Extensions offered by the "Image files" filter of the picker
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff"];

/// Main application state
struct MetadataRemover {
    /// Selected file, preview and status
    session: Session,
    /// ExifTool resolved at startup
    exiftool: ExifTool,
    /// Builds previews for the right-hand pane
    scaler: PreviewScaler,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Browse Image"
    BrowseImage,
    /// User clicked "Remove Metadata"
    RemoveMetadata,
}

impl MetadataRemover {
    /// Create the application around an already-resolved ExifTool
    fn new(exiftool: ExifTool, settings: Settings) -> (Self, Task<Message>) {
        let scaler = PreviewScaler::square(settings.preview_size);
        let mut session = Session::new();

        if let Some(file) = settings.file {
            session.select(file, &scaler);
        }

        (
            MetadataRemover {
                session,
                exiftool,
                scaler,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state.
    ///
    /// Everything runs on the UI thread; the window does not respond while
    /// the picker is open or ExifTool is running.
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BrowseImage => {
                let file = FileDialog::new()
                    .set_title("Select an image")
                    .add_filter("Image files", IMAGE_EXTENSIONS)
                    .add_filter("All files", &["*"])
                    .pick_file();

                match file {
                    Some(path) => self.session.select(path, &self.scaler),
                    None => debug!("File dialog cancelled"),
                }
            }
            Message::RemoveMetadata => {
                self.session.remove_metadata(&self.exiftool, &self.scaler);
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        row![
            ui::controls(&self.session, self.exiftool.keeps_backup()),
            ui::preview(&self.session, self.scaler.max_width),
        ]
        .spacing(ui::PANE_GAP)
        .padding(ui::PANE_GAP)
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Find ExifTool as configured, once, before any window exists
fn resolve_exiftool(settings: &Settings) -> Result<ExifTool, ToolNotFound> {
    exiftool::locate(settings.exiftool.as_deref()).map(|tool| tool.keep_backup(settings.backup))
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,metadata_remover={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let settings = Settings::parse();
    init_logging(settings.verbose);

    // Without ExifTool there is nothing to do; stop before the window opens
    let exiftool = match resolve_exiftool(&settings) {
        Ok(tool) => tool,
        Err(err) => {
            error!("{}", err);
            MessageDialog::new()
                .set_level(MessageLevel::Error)
                .set_title("Error")
                .set_description(err.remediation())
                .set_buttons(MessageButtons::Ok)
                .show();
            return ExitCode::FAILURE;
        }
    };

    if !exiftool.keeps_backup() {
        info!("Files are overwritten in place; pass --backup to keep the original");
    }

    let result = iced::application(
        "Metadata Remover",
        MetadataRemover::update,
        MetadataRemover::view,
    )
    .theme(MetadataRemover::theme)
    .window_size(Size::new(ui::WINDOW_WIDTH, ui::WINDOW_HEIGHT))
    .resizable(false)
    .centered()
    .run_with(move || MetadataRemover::new(exiftool, settings));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Window error: {}", err);
            ExitCode::FAILURE
        }
    }
}
