use ndarray::{s, Array2, ArrayView1};

use crate::shared::constants::HISTOGRAM_BINS;
use crate::shared::error::StatsResult;
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::statistics::window_stats::require_rgb;

/// Per-channel intensity counts over a region, shape `(3, 256)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    counts: Array2<u32>,
}

impl Histogram {
    pub fn compute(frame: &Frame, region: &Region) -> StatsResult<Self> {
        require_rgb(frame)?;
        region.check_within(frame.width(), frame.height())?;

        let mut counts = Array2::<u32>::zeros((3, HISTOGRAM_BINS));
        let view = frame.as_ndarray();
        let window = view.slice(s![
            region.upper() as usize..region.bottom() as usize,
            region.left() as usize..region.right() as usize,
            ..3
        ]);
        for px in window.rows() {
            for c in 0..3 {
                counts[[c, px[c] as usize]] += 1;
            }
        }
        Ok(Self { counts })
    }

    pub fn channel(&self, channel: usize) -> ArrayView1<'_, u32> {
        self.counts.row(channel)
    }

    /// Tallest bin across all channels; used to scale plots.
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.channel(0).iter().map(|&c| c as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::StatsError;

    #[test]
    fn test_counts_each_channel() {
        let frame = Frame::new(vec![0, 10, 255, 0, 20, 255], 2, 1, 3, 0);
        let hist = Histogram::compute(&frame, &Region::full(2, 1)).unwrap();
        assert_eq!(hist.channel(0)[0], 2);
        assert_eq!(hist.channel(1)[10], 1);
        assert_eq!(hist.channel(1)[20], 1);
        assert_eq!(hist.channel(2)[255], 2);
        assert_eq!(hist.max_count(), 2);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn test_sub_region() {
        let frame = Frame::new(vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4], 2, 2, 3, 0);
        let hist = Histogram::compute(&frame, &Region::new(1, 0, 2, 2).unwrap()).unwrap();
        assert_eq!(hist.total(), 2);
        assert_eq!(hist.channel(0)[2], 1);
        assert_eq!(hist.channel(0)[4], 1);
        assert_eq!(hist.channel(0)[1], 0);
    }

    #[test]
    fn test_empty_region_has_no_counts() {
        let frame = Frame::new(vec![9; 12], 2, 2, 3, 0);
        let hist = Histogram::compute(&frame, &Region::new(1, 1, 1, 1).unwrap()).unwrap();
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.max_count(), 0);
    }

    #[test]
    fn test_region_outside_frame_fails() {
        let frame = Frame::new(vec![9; 12], 2, 2, 3, 0);
        assert!(matches!(
            Histogram::compute(&frame, &Region::full(3, 3)),
            Err(StatsError::RegionOutOfBounds { .. })
        ));
    }
}
