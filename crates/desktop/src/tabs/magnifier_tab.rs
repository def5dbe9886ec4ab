use iced::widget::image::FilterMethod;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{canvas, column, container, image, mouse_area, row, scrollable, text, Space};
use iced::{Color, ContentFit, Element, Length, Theme};

use pixelscope_core::pipeline::magnifier_view::Probe;

use crate::app::{scaled, LoadedImage, Message};
use crate::theme::{muted_color, surface_color};
use crate::widgets::file_row::file_row;
use crate::widgets::histogram_chart::HistogramChart;

const SIDE_PANEL_WIDTH: f32 = 260.0;
const HISTOGRAM_HEIGHT: f32 = 120.0;

pub fn view<'a>(
    fs: f32,
    image: Option<&'a LoadedImage>,
    error: Option<&'a str>,
    theme: &Theme,
) -> Element<'a, Message> {
    let muted = muted_color(theme);
    let danger = theme.palette().danger;

    let header = file_row(
        fs,
        "Image",
        image.map(|i| i.path.as_path()),
        Message::OpenImage,
        theme,
    );

    let mut page = column![header].spacing(12);
    if let Some(e) = error {
        page = page.push(text(e.to_string()).size(scaled(13.0, fs)).color(danger));
    }

    let Some(img) = image else {
        return page
            .push(
                text("Open an image and move the cursor over it to inspect pixels.")
                    .size(scaled(14.0, fs))
                    .color(muted),
            )
            .into();
    };

    // Native-size image so cursor coordinates map 1:1 to pixels.
    let picture = mouse_area(
        iced::widget::image(img.handle.clone())
            .content_fit(ContentFit::None)
            .width(Length::Fixed(img.frame.width() as f32))
            .height(Length::Fixed(img.frame.height() as f32)),
    )
    .on_move(Message::CursorMoved)
    .on_exit(Message::CursorLeft);

    let viewer = scrollable(picture)
        .direction(Direction::Both {
            vertical: Scrollbar::default(),
            horizontal: Scrollbar::default(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

    let side = side_panel(fs, img, muted, theme);

    page.push(row![viewer, side].spacing(12).height(Length::Fill))
        .height(Length::Fill)
        .into()
}

fn side_panel<'a>(fs: f32, img: &'a LoadedImage, muted: Color, theme: &Theme) -> Element<'a, Message> {
    let surface = surface_color(theme);

    let crop: Element<'a, Message> = match &img.overlay.crop {
        Some((handle, w, h)) => image(handle.clone())
            .filter_method(FilterMethod::Nearest)
            .content_fit(ContentFit::Fill)
            .width(Length::Fixed(*w as f32))
            .height(Length::Fixed(*h as f32))
            .into(),
        None => text("Move the cursor over the image")
            .size(scaled(12.0, fs))
            .color(muted)
            .into(),
    };

    let info: Element<'a, Message> = match &img.overlay.info {
        Some(probe) => info_panel(fs, probe, muted),
        None => Space::new().height(0).into(),
    };

    let histogram: Element<'a, Message> = match &img.overlay.histogram {
        Some(h) => canvas(HistogramChart::new(h))
            .width(Length::Fill)
            .height(Length::Fixed(HISTOGRAM_HEIGHT))
            .into(),
        None => Space::new().height(0).into(),
    };

    let panel = column![
        container(crop).center_x(Length::Fill),
        info,
        histogram,
    ]
    .spacing(12);

    container(scrollable(panel))
        .padding(12)
        .width(Length::Fixed(SIDE_PANEL_WIDTH))
        .height(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(surface)),
            border: iced::border::Border {
                radius: 8.0.into(),
                ..iced::border::Border::default()
            },
            ..container::Style::default()
        })
        .into()
}

fn info_panel<'a>(fs: f32, probe: &Probe, muted: Color) -> Element<'a, Message> {
    let line = |label: &str, value: String| -> Element<'a, Message> {
        row![
            text(label.to_string())
                .size(scaled(12.0, fs))
                .color(muted)
                .width(Length::Fixed(70.0)),
            text(value).size(scaled(12.0, fs)),
        ]
        .spacing(6)
        .into()
    };

    let [r, g, b] = probe.pixel;
    let std_dev = probe.stats.std_dev();
    column![
        line("Cursor", format!("({}, {})", probe.x, probe.y)),
        line("RGB", format!("{r}, {g}, {b}")),
        line("Intensity", probe.intensity.to_string()),
        line("Window", format!("{}x{}", probe.window.width(), probe.window.height())),
        line("Mean", format_triple(probe.stats.mean)),
        line("Variance", format_triple(probe.stats.variance)),
        line("Std dev", format_triple(std_dev)),
    ]
    .spacing(4)
    .into()
}

pub fn format_triple(v: [f64; 3]) -> String {
    format!("{:.1}, {:.1}, {:.1}", v[0], v[1], v[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_triple() {
        assert_eq!(format_triple([1.0, 2.26, 100.0]), "1.0, 2.3, 100.0");
    }
}
