use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::shared::error::StatsResult;
use crate::statistics::frame_stats::FrameStats;
use crate::statistics::signal::{l1_distance, normalize};

/// Per-frame measures of one video, indexed by frame number.
///
/// `mean` and `std_dev` have shape `(3, frame_count)` with rows R, G, B;
/// `contrast` has one value per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoFrameSeries {
    mean: Array2<f64>,
    std_dev: Array2<f64>,
    contrast: Array1<f64>,
}

impl VideoFrameSeries {
    pub fn from_frame_stats(stats: &[FrameStats]) -> Self {
        let n = stats.len();
        Self {
            mean: Array2::from_shape_fn((3, n), |(c, i)| stats[i].mean[c]),
            std_dev: Array2::from_shape_fn((3, n), |(c, i)| stats[i].std_dev[c]),
            contrast: stats.iter().map(|s| s.contrast).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.contrast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contrast.is_empty()
    }

    pub fn mean(&self) -> ArrayView2<'_, f64> {
        self.mean.view()
    }

    pub fn std_dev(&self) -> ArrayView2<'_, f64> {
        self.std_dev.view()
    }

    pub fn contrast(&self) -> ArrayView1<'_, f64> {
        self.contrast.view()
    }

    pub fn frame(&self, index: usize) -> Option<FrameStats> {
        if index >= self.len() {
            return None;
        }
        let column = |a: &Array2<f64>| {
            let col = a.column(index);
            [col[0], col[1], col[2]]
        };
        Some(FrameStats {
            mean: column(&self.mean),
            std_dev: column(&self.std_dev),
            contrast: self.contrast[index],
        })
    }

    /// Each channel's standard-deviation series normalized against the
    /// contrast series, shape `(3, frame_count)`.
    pub fn normalized_std_dev(&self) -> StatsResult<Array2<f64>> {
        let mut out = Array2::zeros(self.std_dev.raw_dim());
        for (c, row) in self.std_dev.axis_iter(Axis(0)).enumerate() {
            let normalized = normalize(self.contrast.view(), row)?;
            out.row_mut(c).assign(&normalized);
        }
        Ok(out)
    }

    /// L1 distance of each normalized channel series from contrast.
    pub fn channel_distances(&self) -> StatsResult<[f64; 3]> {
        let normalized = self.normalized_std_dev()?;
        let mut distances = [0.0; 3];
        for (c, d) in distances.iter_mut().enumerate() {
            *d = l1_distance(normalized.row(c), self.contrast.view())?;
        }
        Ok(distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::StatsError;
    use approx::assert_relative_eq;

    fn stats(i: f64) -> FrameStats {
        FrameStats {
            mean: [i, i + 1.0, i + 2.0],
            std_dev: [2.0 * i, 3.0 * i + 1.0, i * i],
            contrast: i + 0.5,
        }
    }

    fn series(n: usize) -> VideoFrameSeries {
        let all: Vec<FrameStats> = (0..n).map(|i| stats(i as f64)).collect();
        VideoFrameSeries::from_frame_stats(&all)
    }

    #[test]
    fn test_shapes() {
        let s = series(4);
        assert_eq!(s.len(), 4);
        assert_eq!(s.mean().shape(), &[3, 4]);
        assert_eq!(s.std_dev().shape(), &[3, 4]);
        assert_eq!(s.contrast().len(), 4);
    }

    #[test]
    fn test_rows_are_channels_and_columns_are_frames() {
        let s = series(3);
        assert_eq!(s.mean()[[0, 2]], 2.0);
        assert_eq!(s.mean()[[2, 1]], 3.0);
        assert_eq!(s.std_dev()[[1, 2]], 7.0);
        assert_eq!(s.contrast()[1], 1.5);
    }

    #[test]
    fn test_frame_round_trips_stats() {
        let s = series(3);
        assert_eq!(s.frame(2), Some(stats(2.0)));
        assert_eq!(s.frame(3), None);
    }

    #[test]
    fn test_empty_series() {
        let s = VideoFrameSeries::from_frame_stats(&[]);
        assert!(s.is_empty());
        assert_eq!(s.mean().shape(), &[3, 0]);
    }

    #[test]
    fn test_channel_distances_zero_when_channel_tracks_contrast() {
        // Channel R std-dev is an affine copy of contrast
        let all: Vec<FrameStats> = (0..5)
            .map(|i| {
                let c = i as f64 * 3.0 + 1.0;
                FrameStats {
                    mean: [0.0; 3],
                    std_dev: [c * 2.0 + 4.0, c * c, (i % 2) as f64 + 1.0],
                    contrast: c,
                }
            })
            .collect();
        let s = VideoFrameSeries::from_frame_stats(&all);
        let distances = s.channel_distances().unwrap();
        assert_relative_eq!(distances[0], 0.0, epsilon = 1e-9);
        assert!(distances[1] > 0.0);
    }

    #[test]
    fn test_normalized_std_dev_fails_on_constant_channel() {
        let all: Vec<FrameStats> = (0..3)
            .map(|i| FrameStats {
                mean: [0.0; 3],
                std_dev: [1.0, i as f64, i as f64],
                contrast: i as f64,
            })
            .collect();
        let s = VideoFrameSeries::from_frame_stats(&all);
        assert!(matches!(
            s.normalized_std_dev(),
            Err(StatsError::DivideByZero(_))
        ));
    }
}
