use iced::mouse;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use crate::theme::{muted_color, surface_color};

const PADDING: f32 = 6.0;

/// Overlaid line plots sharing one y-range, with an optional vertical
/// marker at a sample index.
pub struct LineChart<'a> {
    lines: Vec<(&'a [f64], Color)>,
    marker: Option<usize>,
}

impl<'a> LineChart<'a> {
    pub fn new(lines: Vec<(&'a [f64], Color)>, marker: Option<usize>) -> Self {
        Self { lines, marker }
    }

    fn len(&self) -> usize {
        self.lines.iter().map(|(l, _)| l.len()).max().unwrap_or(0)
    }
}

/// Min and max over all finite values, widened when flat.
pub fn value_range<'a>(lines: impl IntoIterator<Item = &'a [f64]>) -> Option<(f64, f64)> {
    let (lo, hi) = lines
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return None;
    }
    if hi - lo < f64::EPSILON {
        return Some((lo - 1.0, hi + 1.0));
    }
    Some((lo, hi))
}

/// Maps sample `(i, v)` into a plot area of `size`, y growing downwards.
pub fn to_point(i: usize, v: f64, len: usize, range: (f64, f64), size: Size) -> Point {
    let w = (size.width - 2.0 * PADDING).max(1.0);
    let h = (size.height - 2.0 * PADDING).max(1.0);
    let x = if len > 1 {
        i as f32 / (len - 1) as f32 * w
    } else {
        w / 2.0
    };
    let t = ((v - range.0) / (range.1 - range.0)) as f32;
    Point::new(PADDING + x, PADDING + (1.0 - t) * h)
}

impl<Message> canvas::Program<Message> for LineChart<'_> {
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

        let len = self.len();
        let Some(range) = value_range(self.lines.iter().map(|(l, _)| *l)) else {
            return vec![frame.into_geometry()];
        };

        if let Some(marker) = self.marker.filter(|&m| m < len) {
            let top = to_point(marker, range.1, len, range, bounds.size());
            let bottom = to_point(marker, range.0, len, range, bounds.size());
            frame.stroke(
                &Path::line(top, bottom),
                Stroke::default()
                    .with_color(muted_color(theme))
                    .with_width(1.0),
            );
        }

        for (values, color) in &self.lines {
            if values.is_empty() {
                continue;
            }
            let path = Path::new(|b| {
                for (i, &v) in values.iter().enumerate() {
                    let p = to_point(i, v, len, range, bounds.size());
                    if i == 0 {
                        b.move_to(p);
                    } else {
                        b.line_to(p);
                    }
                }
            });
            frame.stroke(&path, Stroke::default().with_color(*color).with_width(1.5));
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_value_range_spans_all_lines() {
        let a = [1.0, 5.0];
        let b = [-2.0, 3.0];
        assert_eq!(value_range([&a[..], &b[..]]), Some((-2.0, 5.0)));
    }

    #[test]
    fn test_value_range_widens_flat_lines() {
        let a = [4.0, 4.0];
        assert_eq!(value_range([&a[..]]), Some((3.0, 5.0)));
    }

    #[test]
    fn test_value_range_ignores_non_finite() {
        let a = [f64::NAN, 2.0, f64::INFINITY, 6.0];
        assert_eq!(value_range([&a[..]]), Some((2.0, 6.0)));
    }

    #[test]
    fn test_value_range_empty() {
        let a: [f64; 0] = [];
        assert_eq!(value_range([&a[..]]), None);
    }

    #[test]
    fn test_to_point_corners() {
        let size = Size::new(112.0, 62.0);
        let first = to_point(0, 10.0, 11, (0.0, 10.0), size);
        let last = to_point(10, 0.0, 11, (0.0, 10.0), size);
        assert_relative_eq!(first.x, PADDING);
        assert_relative_eq!(first.y, PADDING);
        assert_relative_eq!(last.x, 112.0 - PADDING);
        assert_relative_eq!(last.y, 62.0 - PADDING);
    }
}
