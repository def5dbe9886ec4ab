use iced::widget::{canvas, column, container, image, progress_bar, row, text};
use iced::{Color, ContentFit, Element, Length, Theme};

use pixelscope_core::shared::constants::CHANNEL_NAMES;

use crate::app::{scaled, AnalysisState, ChartData, Message, VideoSession};
use crate::tabs::magnifier_tab::format_triple;
use crate::theme::{channel_color, contrast_color, muted_color};
use crate::widgets::file_row::file_row;
use crate::widgets::line_chart::LineChart;

const CHART_HEIGHT: f32 = 150.0;
const PLAYER_HEIGHT: f32 = 260.0;

pub fn view<'a>(fs: f32, session: Option<&'a VideoSession>, theme: &Theme) -> Element<'a, Message> {
    let muted = muted_color(theme);
    let danger = theme.palette().danger;

    let header = file_row(
        fs,
        "Video",
        session.map(|s| s.path.as_path()),
        Message::OpenVideo,
        theme,
    );

    let Some(session) = session else {
        return column![
            header,
            text("Open a video to plot per-frame statistics.")
                .size(scaled(14.0, fs))
                .color(muted),
        ]
        .spacing(12)
        .into();
    };

    let player: Element<'a, Message> = match &session.current {
        Some((handle, _, _)) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fixed(PLAYER_HEIGHT))
            .into(),
        None => container(text("Decoding\u{2026}").size(scaled(13.0, fs)).color(muted))
            .center_x(Length::Fill)
            .height(Length::Fixed(PLAYER_HEIGHT))
            .into(),
    };

    let frame_line = match &session.current {
        Some((_, index, stats)) => format!(
            "Frame {index}  mean {}  std {}  contrast {:.2}",
            format_triple(stats.mean),
            format_triple(stats.std_dev),
            stats.contrast
        ),
        None => String::new(),
    };

    let mut page = column![header, player, text(frame_line).size(scaled(12.0, fs))].spacing(10);

    if let Some(e) = &session.playback_error {
        page = page.push(text(format!("Playback: {e}")).size(scaled(13.0, fs)).color(danger));
    }

    let marker = session.current.as_ref().map(|(_, index, _)| *index);
    page = match &session.analysis {
        AnalysisState::Running { done, total } => {
            let label = if *total > 0 {
                format!("Analyzing frame {done} of {total}")
            } else {
                format!("Analyzing frame {done}")
            };
            let fraction = if *total > 0 {
                *done as f32 / *total as f32
            } else {
                0.0
            };
            page.push(progress_bar(0.0..=1.0, fraction))
                .push(text(label).size(scaled(12.0, fs)).color(muted))
        }
        AnalysisState::Failed(e) => page.push(
            text(format!("Analysis failed: {e}"))
                .size(scaled(13.0, fs))
                .color(danger),
        ),
        AnalysisState::Complete(data) => page.push(charts(fs, data, marker, muted, theme)),
    };

    iced::widget::scrollable(page).height(Length::Fill).into()
}

fn charts<'a>(
    fs: f32,
    data: &'a ChartData,
    marker: Option<usize>,
    muted: Color,
    theme: &Theme,
) -> Element<'a, Message> {
    let mut raw_lines: Vec<(&'a [f64], Color)> = data
        .means
        .iter()
        .enumerate()
        .map(|(c, m)| (m.as_slice(), channel_color(c)))
        .collect();
    raw_lines.push((data.contrast.as_slice(), contrast_color(theme)));

    let raw = column![
        text(format!("Mean per channel and contrast ({} frames)", data.series.len()))
            .size(scaled(13.0, fs)),
        canvas(LineChart::new(raw_lines, marker))
            .width(Length::Fill)
            .height(Length::Fixed(CHART_HEIGHT)),
    ]
    .spacing(4);

    let normalized: Element<'a, Message> = match &data.normalized {
        Some(series) => {
            let mut lines: Vec<(&'a [f64], Color)> = series
                .iter()
                .enumerate()
                .map(|(c, s)| (s.as_slice(), channel_color(c)))
                .collect();
            lines.push((data.contrast.as_slice(), contrast_color(theme)));
            column![
                text("Std dev normalized against contrast").size(scaled(13.0, fs)),
                canvas(LineChart::new(lines, marker))
                    .width(Length::Fill)
                    .height(Length::Fixed(CHART_HEIGHT)),
            ]
            .spacing(4)
            .into()
        }
        None => text("Normalized series unavailable (constant series)")
            .size(scaled(12.0, fs))
            .color(muted)
            .into(),
    };

    column![raw, normalized, distance_labels(fs, data.distances, muted)]
        .spacing(12)
        .into()
}

fn distance_labels<'a>(fs: f32, distances: Option<[f64; 3]>, muted: Color) -> Element<'a, Message> {
    let Some(distances) = distances else {
        return text("L1 distances unavailable")
            .size(scaled(12.0, fs))
            .color(muted)
            .into();
    };
    row(distances
        .iter()
        .enumerate()
        .map(|(c, d)| {
            text(distance_label(c, *d))
                .size(scaled(13.0, fs))
                .color(channel_color(c))
                .into()
        })
        .collect::<Vec<_>>())
    .spacing(18)
    .into()
}

fn distance_label(channel: usize, distance: f64) -> String {
    format!("L1 {}: {distance:.3}", CHANNEL_NAMES[channel])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_label() {
        assert_eq!(distance_label(0, 1.5), format!("L1 {}: 1.500", CHANNEL_NAMES[0]));
    }
}
