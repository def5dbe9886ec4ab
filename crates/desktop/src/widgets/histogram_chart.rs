use iced::mouse;
use iced::widget::canvas::{self, Frame, Geometry};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use pixelscope_core::statistics::histogram::Histogram;

use crate::theme::{channel_color, surface_color};

/// Translucent per-channel bar histogram of the magnifier window.
pub struct HistogramChart<'a> {
    histogram: &'a Histogram,
}

impl<'a> HistogramChart<'a> {
    pub fn new(histogram: &'a Histogram) -> Self {
        Self { histogram }
    }
}

impl<Message> canvas::Program<Message> for HistogramChart<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), surface_color(theme));

        let max = self.histogram.max_count();
        if max == 0 {
            return vec![frame.into_geometry()];
        }

        for c in 0..3 {
            let counts = self.histogram.channel(c);
            let bar_width = bounds.width / counts.len() as f32;
            let color = Color {
                a: 0.5,
                ..channel_color(c)
            };
            for (bin, &count) in counts.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let h = count as f32 / max as f32 * bounds.height;
                frame.fill_rectangle(
                    Point::new(bin as f32 * bar_width, bounds.height - h),
                    Size::new(bar_width.max(1.0), h),
                    color,
                );
            }
        }

        vec![frame.into_geometry()]
    }
}
