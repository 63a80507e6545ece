use iced::widget::{button, column, container, text, Image};
use iced::{Alignment, Color, Element, Length};

use crate::state::Session;
use crate::Message;

/// Fixed window size; the window cannot be resized
pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

/// Width of the left-hand control column
pub const CONTROLS_WIDTH: f32 = 300.0;

/// Padding around the two panes and the gap between them
pub const PANE_GAP: f32 = 10.0;

/// Largest preview box that fits beside the controls, with a margin on the right
pub const MAX_PREVIEW_SIZE: u32 = (WINDOW_WIDTH - CONTROLS_WIDTH - 4.0 * PANE_GAP) as u32;

fn status_color(success: bool) -> Color {
    if success {
        Color::from_rgb(0.13, 0.55, 0.13)
    } else {
        Color::from_rgb(0.8, 0.1, 0.1)
    }
}

/// Path label, buttons, status and the overwrite warning
pub fn controls(session: &Session, keeps_backup: bool) -> Element<'_, Message> {
    let path_label = session
        .selected()
        .map(|file| file.to_string())
        .unwrap_or_else(|| "No file selected".to_string());

    // Disabled until a file is selected
    let remove_button = button("Remove Metadata")
        .on_press_maybe(session.can_remove().then_some(Message::RemoveMetadata))
        .padding(5);

    let status = match session.status() {
        Some(result) => text(&result.message).color(status_color(result.success)),
        None => text(""),
    };

    let warning = if keeps_backup {
        "The original is kept next to the file as <name>_original."
    } else {
        "Warning: the file is overwritten in place. No backup is kept."
    };

    column![
        text(path_label).size(14),
        button("Browse Image")
            .on_press(Message::BrowseImage)
            .padding(5),
        remove_button,
        status.size(14),
        text(warning).size(12),
    ]
    .spacing(10)
    .padding(10)
    .width(Length::Fixed(CONTROLS_WIDTH))
    .align_x(Alignment::Center)
    .into()
}

/// Bordered `size` x `size` box holding the preview or a placeholder
pub fn preview(session: &Session, size: u32) -> Element<'_, Message> {
    let content: Element<'_, Message> = match (session.preview(), session.preview_error()) {
        (Some(preview), _) => Image::new(preview.handle.clone())
            .width(Length::Fixed(preview.width as f32))
            .height(Length::Fixed(preview.height as f32))
            .into(),
        (None, Some(reason)) => column![
            text("Failed to load image"),
            text(reason).size(12),
        ]
        .spacing(5)
        .padding(10)
        .align_x(Alignment::Center)
        .into(),
        (None, None) => text("Image Preview").into(),
    };

    let side = Length::Fixed(size as f32);

    container(content)
        .center_x(side)
        .center_y(side)
        .style(container::bordered_box)
        .into()
}
