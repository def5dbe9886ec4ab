//! View state of the magnifier as a pure function of cursor movement.
//!
//! The GUI feeds cursor positions in image pixel coordinates and applies
//! the returned [`RedrawCommand`]s; no drawing happens here.

use crate::shared::constants::{DEFAULT_WINDOW_RADIUS, DEFAULT_ZOOM};
use crate::shared::error::StatsResult;
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::statistics::histogram::Histogram;
use crate::statistics::window_stats::{luma, pixel_at, window_stats, WindowStats};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MagnifierConfig {
    pub radius: u32,
    pub zoom: u32,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_WINDOW_RADIUS,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Everything the information panel shows for one cursor position.
#[derive(Clone, Debug, PartialEq)]
pub struct Probe {
    pub x: u32,
    pub y: u32,
    pub pixel: [u8; 3],
    pub intensity: u8,
    pub window: Region,
    pub stats: WindowStats,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RedrawCommand {
    /// Show `window` of the image scaled by `zoom`.
    Crop { window: Region, zoom: u32 },
    Info(Probe),
    Histogram(Histogram),
    /// Remove crop, info and histogram overlays.
    ClearOverlay,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MagnifierState {
    probe: Option<Probe>,
    config: MagnifierConfig,
}

impl MagnifierState {
    pub fn new(config: MagnifierConfig) -> Self {
        Self {
            probe: None,
            config,
        }
    }

    pub fn probe(&self) -> Option<&Probe> {
        self.probe.as_ref()
    }

    pub fn config(&self) -> MagnifierConfig {
        self.config
    }

    /// Transition for a cursor at image pixel `(x, y)`.
    ///
    /// Positions outside the image clear the overlays once; staying on the
    /// same pixel produces no commands.
    pub fn on_cursor_moved(
        &self,
        frame: &Frame,
        x: i64,
        y: i64,
    ) -> StatsResult<(MagnifierState, Vec<RedrawCommand>)> {
        let inside = x >= 0 && y >= 0 && x < frame.width() as i64 && y < frame.height() as i64;
        if !inside {
            return Ok(self.cleared());
        }

        let (x, y) = (x as u32, y as u32);
        if self.probe.as_ref().is_some_and(|p| p.x == x && p.y == y) {
            return Ok((self.clone(), Vec::new()));
        }
        self.probe_at(frame, x, y)
    }

    /// Recomputes the current probe with a new radius or zoom.
    pub fn on_config_changed(
        &self,
        frame: &Frame,
        config: MagnifierConfig,
    ) -> StatsResult<(MagnifierState, Vec<RedrawCommand>)> {
        let next = MagnifierState {
            probe: None,
            config,
        };
        match &self.probe {
            Some(p) => next.probe_at(frame, p.x, p.y),
            None => Ok((next, Vec::new())),
        }
    }

    /// Transition for a newly opened image: nothing is probed yet.
    pub fn on_image_replaced(&self) -> (MagnifierState, Vec<RedrawCommand>) {
        (
            MagnifierState::new(self.config),
            vec![RedrawCommand::ClearOverlay],
        )
    }

    fn probe_at(
        &self,
        frame: &Frame,
        x: u32,
        y: u32,
    ) -> StatsResult<(MagnifierState, Vec<RedrawCommand>)> {
        let window = Region::around(x, y, self.config.radius, frame.width(), frame.height());
        let pixel = pixel_at(frame, x, y)?;
        let probe = Probe {
            x,
            y,
            pixel,
            intensity: luma(pixel),
            window,
            stats: window_stats(frame, &window)?,
        };
        let commands = vec![
            RedrawCommand::Crop {
                window,
                zoom: self.config.zoom,
            },
            RedrawCommand::Info(probe.clone()),
            RedrawCommand::Histogram(Histogram::compute(frame, &window)?),
        ];
        let next = MagnifierState {
            probe: Some(probe),
            config: self.config,
        };
        Ok((next, commands))
    }

    fn cleared(&self) -> (MagnifierState, Vec<RedrawCommand>) {
        let commands = if self.probe.is_some() {
            vec![RedrawCommand::ClearOverlay]
        } else {
            Vec::new()
        };
        (MagnifierState::new(self.config), commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// 20x10 frame whose red channel is the column and green the row.
    fn gradient_frame() -> Frame {
        let mut data = Vec::new();
        for y in 0..10u8 {
            for x in 0..20u8 {
                data.extend_from_slice(&[x, y, 0]);
            }
        }
        Frame::new(data, 20, 10, 3, 0)
    }

    fn config(radius: u32) -> MagnifierConfig {
        MagnifierConfig { radius, zoom: 4 }
    }

    #[test]
    fn test_move_inside_emits_crop_info_histogram() {
        let frame = gradient_frame();
        let state = MagnifierState::new(config(2));
        let (next, commands) = state.on_cursor_moved(&frame, 5, 4).unwrap();

        let probe = next.probe().unwrap();
        assert_eq!(probe.pixel, [5, 4, 0]);
        assert_eq!(probe.window, Region::new(3, 2, 8, 7).unwrap());
        assert_eq!(probe.stats.mean, [5.0, 4.0, 0.0]);
        assert_eq!(probe.stats.pixel_count, 25);

        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[0],
            RedrawCommand::Crop {
                window: probe.window,
                zoom: 4
            }
        );
        assert!(matches!(&commands[1], RedrawCommand::Info(p) if p == probe));
        assert!(matches!(&commands[2], RedrawCommand::Histogram(h) if h.total() == 25));
    }

    #[test]
    fn test_same_pixel_is_a_no_op() {
        let frame = gradient_frame();
        let (state, _) = MagnifierState::new(config(2))
            .on_cursor_moved(&frame, 5, 4)
            .unwrap();
        let (again, commands) = state.on_cursor_moved(&frame, 5, 4).unwrap();
        assert!(commands.is_empty());
        assert_eq!(again, state);
    }

    #[rstest]
    #[case::left(-1, 3)]
    #[case::above(3, -1)]
    #[case::right(20, 3)]
    #[case::below(3, 10)]
    fn test_leaving_image_clears_once(#[case] x: i64, #[case] y: i64) {
        let frame = gradient_frame();
        let (state, _) = MagnifierState::new(config(2))
            .on_cursor_moved(&frame, 1, 1)
            .unwrap();

        let (outside, commands) = state.on_cursor_moved(&frame, x, y).unwrap();
        assert_eq!(commands, vec![RedrawCommand::ClearOverlay]);
        assert!(outside.probe().is_none());

        let (_, commands) = outside.on_cursor_moved(&frame, x, y).unwrap();
        assert!(commands.is_empty());
    }

    #[test]
    fn test_window_clamped_at_corner() {
        let frame = gradient_frame();
        let (state, _) = MagnifierState::new(config(3))
            .on_cursor_moved(&frame, 19, 9)
            .unwrap();
        let probe = state.probe().unwrap();
        assert_eq!(probe.window, Region::new(16, 6, 20, 10).unwrap());
        assert_eq!(probe.stats.pixel_count, 16);
    }

    #[test]
    fn test_config_change_recomputes_probe() {
        let frame = gradient_frame();
        let (state, _) = MagnifierState::new(config(1))
            .on_cursor_moved(&frame, 10, 5)
            .unwrap();
        let (state, commands) = state.on_config_changed(&frame, config(3)).unwrap();
        assert_eq!(state.probe().unwrap().stats.pixel_count, 49);
        assert_eq!(state.config().radius, 3);
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn test_config_change_without_probe_is_quiet() {
        let frame = gradient_frame();
        let (state, commands) = MagnifierState::default()
            .on_config_changed(&frame, config(5))
            .unwrap();
        assert!(commands.is_empty());
        assert_eq!(state.config().radius, 5);
    }

    #[test]
    fn test_image_replaced_resets_probe() {
        let frame = gradient_frame();
        let (state, _) = MagnifierState::new(config(2))
            .on_cursor_moved(&frame, 1, 1)
            .unwrap();
        let (fresh, commands) = state.on_image_replaced();
        assert!(fresh.probe().is_none());
        assert_eq!(fresh.config(), config(2));
        assert_eq!(commands, vec![RedrawCommand::ClearOverlay]);
    }

    #[test]
    fn test_intensity_is_luma_of_pixel() {
        let frame = Frame::new(vec![255, 0, 0], 1, 1, 3, 0);
        let (state, _) = MagnifierState::default()
            .on_cursor_moved(&frame, 0, 0)
            .unwrap();
        assert_eq!(state.probe().unwrap().intensity, 76);
    }
}
