//! Per-channel statistics over a rectangular window of an RGB frame.

use ndarray::s;

use crate::shared::constants::LUMA_WEIGHTS;
use crate::shared::error::{StatsError, StatsResult};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Mean and population variance of each channel over a region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowStats {
    pub mean: [f64; 3],
    pub variance: [f64; 3],
    pub pixel_count: u64,
}

impl WindowStats {
    pub fn std_dev(&self) -> [f64; 3] {
        self.variance.map(f64::sqrt)
    }
}

/// Single pass over `region`, accumulating sum and sum of squares per
/// channel.
///
/// Variance is `E[X^2] - E[X]^2`, clamped at zero to absorb floating-point
/// cancellation. The region must already be clamped to the frame.
pub fn window_stats(frame: &Frame, region: &Region) -> StatsResult<WindowStats> {
    require_rgb(frame)?;
    region.check_within(frame.width(), frame.height())?;
    if region.is_empty() {
        return Err(StatsError::InvalidArgument(format!(
            "region {region:?} contains no pixels"
        )));
    }

    let view = frame.as_ndarray();
    let window = view.slice(s![
        region.upper() as usize..region.bottom() as usize,
        region.left() as usize..region.right() as usize,
        ..3
    ]);

    let mut sum = [0.0f64; 3];
    let mut sum_sq = [0.0f64; 3];
    for px in window.rows() {
        for c in 0..3 {
            let v = px[c] as f64;
            sum[c] += v;
            sum_sq[c] += v * v;
        }
    }

    let n = region.area() as f64;
    let mean = sum.map(|s| s / n);
    let mut variance = [0.0f64; 3];
    for c in 0..3 {
        variance[c] = (sum_sq[c] / n - mean[c] * mean[c]).max(0.0);
    }

    Ok(WindowStats {
        mean,
        variance,
        pixel_count: region.area(),
    })
}

/// Channel values `(r, g, b)` of the pixel at column `x`, row `y`.
pub fn pixel_at(frame: &Frame, x: u32, y: u32) -> StatsResult<[u8; 3]> {
    require_rgb(frame)?;
    if x >= frame.width() || y >= frame.height() {
        return Err(StatsError::OutOfBounds {
            x,
            y,
            width: frame.width(),
            height: frame.height(),
        });
    }
    let channels = frame.channels() as usize;
    let offset = (y as usize * frame.width() as usize + x as usize) * channels;
    let px = &frame.data()[offset..offset + 3];
    Ok([px[0], px[1], px[2]])
}

/// BT.601 greyscale value, rounded like the usual RGB to GRAY converters.
pub fn luma(rgb: [u8; 3]) -> u8 {
    let y: f64 = rgb
        .iter()
        .zip(LUMA_WEIGHTS)
        .map(|(&v, w)| v as f64 * w)
        .sum();
    y.round().clamp(0.0, 255.0) as u8
}

pub(crate) fn require_rgb(frame: &Frame) -> StatsResult<()> {
    if frame.channels() < 3 {
        return Err(StatsError::InvalidArgument(format!(
            "expected an RGB frame, got {} channel(s)",
            frame.channels()
        )));
    }
    Ok(())
}
