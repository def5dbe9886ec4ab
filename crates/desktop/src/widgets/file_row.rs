use std::path::Path;

use iced::widget::{button, column, container, row, text, Space};
use iced::{Element, Length, Theme};

use crate::app::{scaled, Message};
use crate::theme::{muted_color, surface_color};

const CORNER_RADIUS: f32 = 8.0;

/// Label, current file name and an "Open" button.
pub fn file_row<'a>(
    fs: f32,
    label: &str,
    path: Option<&Path>,
    on_open: Message,
    theme: &Theme,
) -> Element<'a, Message> {
    let muted = muted_color(theme);
    let surface = surface_color(theme);

    let display_text = match path.and_then(|p| p.file_name()) {
        Some(name) => text(name.to_string_lossy().to_string()).size(scaled(15.0, fs)),
        None => text("No file selected")
            .size(scaled(15.0, fs))
            .color(muted),
    };

    let label_text = text(label.to_uppercase())
        .size(scaled(11.0, fs))
        .color(muted);

    let info = column![label_text, Space::new().height(2), display_text].width(Length::Fill);
    let open_btn = button(text("Open\u{2026}").size(scaled(13.0, fs)))
        .on_press(on_open)
        .padding([6, 14]);

    container(row![info, open_btn].spacing(8).align_y(iced::Alignment::Center))
        .padding([10, 14])
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(surface)),
            border: iced::border::Border {
                radius: CORNER_RADIUS.into(),
                ..iced::border::Border::default()
            },
            ..container::Style::default()
        })
        .into()
}
