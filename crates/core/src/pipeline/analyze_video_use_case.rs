use std::path::Path;
use std::time::Instant;

use crate::pipeline::analysis_logger::AnalysisLogger;
use crate::pipeline::video_frame_series::VideoFrameSeries;
use crate::shared::error::{StatsError, StatsResult};
use crate::shared::video_metadata::VideoMetadata;
use crate::statistics::frame_stats::{frame_stats, FrameStats};
use crate::video::domain::video_reader::VideoReader;

/// Owns one open video source and the statistics computed from it.
///
/// The whole series is computed eagerly in [`VideoAnalyzer::open`]. The
/// reader is closed when the analyzer is dropped or replaced, and also
/// when opening or analysis fails.
pub struct VideoAnalyzer {
    reader: Box<dyn VideoReader>,
    metadata: VideoMetadata,
    series: VideoFrameSeries,
}

impl VideoAnalyzer {
    pub fn open(
        mut reader: Box<dyn VideoReader>,
        path: &Path,
        logger: &mut dyn AnalysisLogger,
    ) -> StatsResult<Self> {
        match analyze(reader.as_mut(), path, logger) {
            Ok((metadata, series)) => Ok(Self {
                reader,
                metadata,
                series,
            }),
            Err(e) => {
                reader.close();
                Err(e)
            }
        }
    }

    /// Releases the current source, then opens and analyzes another.
    pub fn replace(
        self,
        reader: Box<dyn VideoReader>,
        path: &Path,
        logger: &mut dyn AnalysisLogger,
    ) -> StatsResult<Self> {
        drop(self);
        Self::open(reader, path, logger)
    }

    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    pub fn series(&self) -> &VideoFrameSeries {
        &self.series
    }

    /// Gives up the source while keeping the computed series.
    pub fn into_series(mut self) -> VideoFrameSeries {
        self.reader.close();
        std::mem::replace(&mut self.series, VideoFrameSeries::from_frame_stats(&[]))
    }
}

impl Drop for VideoAnalyzer {
    fn drop(&mut self) {
        self.reader.close();
    }
}

fn analyze(
    reader: &mut dyn VideoReader,
    path: &Path,
    logger: &mut dyn AnalysisLogger,
) -> StatsResult<(VideoMetadata, VideoFrameSeries)> {
    let metadata = reader.open(path).map_err(|e| StatsError::Open {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    logger.info(&format!(
        "Analyzing {} ({}x{})",
        path.display(),
        metadata.width,
        metadata.height
    ));

    let total = metadata.total_frames;
    let mut stats: Vec<FrameStats> = Vec::with_capacity(total);
    let mut frames = reader.frames();

    loop {
        let decode_start = Instant::now();
        let frame = match frames.next() {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => {
                log::debug!("Stopping at frame {}: {e}", stats.len());
                break;
            }
            None => break,
        };
        logger.timing("decode", decode_start.elapsed().as_secs_f64() * 1000.0);

        let stats_start = Instant::now();
        stats.push(frame_stats(&frame)?);
        logger.timing("stats", stats_start.elapsed().as_secs_f64() * 1000.0);
        logger.progress(stats.len(), total);
    }
    drop(frames);

    if stats.is_empty() {
        return Err(StatsError::Open {
            path: path.to_path_buf(),
            reason: "no readable frames".to_string(),
        });
    }
    if total > 0 && stats.len() != total {
        log::debug!(
            "Container reported {total} frames, decoded {}",
            stats.len()
        );
    }

    logger.summary();
    Ok((metadata, VideoFrameSeries::from_frame_stats(&stats)))
}
