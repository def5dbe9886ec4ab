use crate::shared::error::{StatsError, StatsResult};
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::statistics::window_stats::{luma, window_stats};

/// Whole-frame measures recorded for every frame of a video.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    pub mean: [f64; 3],
    pub std_dev: [f64; 3],
    /// Population standard deviation of the greyscale frame.
    pub contrast: f64,
}

pub fn frame_stats(frame: &Frame) -> StatsResult<FrameStats> {
    let stats = window_stats(frame, &Region::full(frame.width(), frame.height()))?;
    Ok(FrameStats {
        mean: stats.mean,
        std_dev: stats.std_dev(),
        contrast: greyscale_std_dev(frame)?,
    })
}

fn greyscale_std_dev(frame: &Frame) -> StatsResult<f64> {
    let n = frame.pixel_count();
    if n == 0 {
        return Err(StatsError::InvalidArgument("frame has no pixels".into()));
    }
    let channels = frame.channels() as usize;
    let (sum, sum_sq) = frame
        .data()
        .chunks_exact(channels)
        .map(|px| luma([px[0], px[1], px[2]]) as f64)
        .fold((0.0f64, 0.0f64), |(s, sq), y| (s + y, sq + y * y));
    let n = n as f64;
    let mean = sum / n;
    Ok((sum_sq / n - mean * mean).max(0.0).sqrt())
}
