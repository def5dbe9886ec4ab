use iced::widget::{button, checkbox, column, pick_list, row, slider, text, Space};
use iced::{Element, Length};

use crate::app::{scaled, Message};
use crate::settings::{Appearance, Settings, INTERVAL_RANGE, RADIUS_RANGE, ZOOM_RANGE};

pub fn view<'a>(settings: &Settings) -> Element<'a, Message> {
    let fs = settings.font_scale;

    let labeled = |label: &'static str, control: Element<'a, Message>, value: String| {
        row![
            text(label)
                .size(scaled(13.0, fs))
                .width(Length::Fixed(130.0)),
            control,
            text(value)
                .size(scaled(13.0, fs))
                .width(Length::Fixed(60.0)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center)
    };

    column![
        text("Magnifier").size(scaled(16.0, fs)),
        Space::new().height(8),
        labeled(
            "Window radius",
            slider(RADIUS_RANGE, settings.window_radius, Message::RadiusChanged).into(),
            format!("{} px", settings.window_radius),
        ),
        Space::new().height(8),
        labeled(
            "Zoom",
            slider(ZOOM_RANGE, settings.zoom, Message::ZoomChanged).into(),
            format!("{}x", settings.zoom),
        ),
        Space::new().height(20),
        text("Video").size(scaled(16.0, fs)),
        Space::new().height(8),
        labeled(
            "Playback interval",
            slider(
                INTERVAL_RANGE,
                settings.playback_interval_ms,
                Message::IntervalChanged
            )
            .step(10u32)
            .into(),
            format!("{} ms", settings.playback_interval_ms),
        ),
        Space::new().height(12),
        button(text("Restore defaults").size(scaled(13.0, fs)))
            .on_press(Message::RestoreDefaults)
            .style(button::secondary),
        Space::new().height(20),
        text("Theme").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            text("Mode").size(scaled(13.0, fs)),
            pick_list(Appearance::ALL, Some(settings.appearance), |a| {
                Message::AppearanceChanged(a)
            })
            .text_size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(12),
        checkbox(settings.high_contrast)
            .label("High contrast")
            .on_toggle(Message::HighContrastChanged)
            .text_size(scaled(13.0, fs)),
        Space::new().height(20),
        text("Font size").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            slider(0.8..=1.5, settings.font_scale, Message::FontScaleChanged).step(0.05),
            text(format!("{:.0}%", settings.font_scale * 100.0)).size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
    ]
    .spacing(0)
    .into()
}
