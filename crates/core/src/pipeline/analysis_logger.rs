use std::collections::HashMap;
use std::time::Instant;

/// Observer for long-running analysis passes.
///
/// The CLI reports through `log`; the desktop app forwards progress over
/// its worker channel; tests discard everything.
pub trait AnalysisLogger: Send {
    /// Frame-level progress. `total` is 0 when the source does not report
    /// a frame count.
    fn progress(&mut self, current: usize, total: usize);

    /// How long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    fn info(&mut self, message: &str);

    /// End-of-pass summary. Default: no-op.
    fn summary(&self) {}
}

pub struct NullAnalysisLogger;

impl AnalysisLogger for NullAnalysisLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logs throttled progress and a per-stage timing summary.
pub struct StdoutAnalysisLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
    frames_seen: usize,
}

impl StdoutAnalysisLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            start_time: Instant::now(),
            frames_seen: 0,
        }
    }

    /// Formatted summary, or `None` if nothing was timed.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames_seen;
        let mut lines = vec![format!(
            "Analysis summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:6.2}ms  total {total_ms:7.0}ms"
            ));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }
}

impl Default for StdoutAnalysisLogger {
    fn default() -> Self {
        Self::new(25)
    }
}

impl AnalysisLogger for StdoutAnalysisLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.frames_seen = current;
        let at_checkpoint = current % self.throttle_frames == 0;
        if total > 0 && (at_checkpoint || current == total) {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Analyzing: {current}/{total} frames ({pct:.1}%)");
        } else if total == 0 && at_checkpoint {
            log::info!("Analyzing: {current} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullAnalysisLogger;
        logger.progress(1, 10);
        logger.timing("stats", 5.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = StdoutAnalysisLogger::new(10);
        logger.timing("decode", 20.0);
        logger.timing("decode", 30.0);
        logger.timing("stats", 5.0);

        assert_eq!(logger.timings_for("decode").unwrap(), &[20.0, 30.0]);
        assert_eq!(logger.timings_for("stats").unwrap(), &[5.0]);
        assert!(logger.timings_for("missing").is_none());
    }

    #[test]
    fn test_summary_lists_stages_and_throughput() {
        let mut logger = StdoutAnalysisLogger::new(10);
        logger.progress(100, 100);
        logger.timing("decode", 2.0);
        logger.timing("stats", 1.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Analysis summary (100 frames"));
        assert!(summary.contains("decode"));
        assert!(summary.contains("stats"));
        assert!(summary.contains("fps"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = StdoutAnalysisLogger::new(10);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_progress_with_unknown_total_tracks_frames() {
        let mut logger = StdoutAnalysisLogger::new(10);
        for i in 1..=15 {
            logger.progress(i, 0);
        }
        assert_eq!(logger.frames_seen, 15);
    }

    #[test]
    fn test_info_leaves_summary_untouched() {
        let mut logger = StdoutAnalysisLogger::new(10);
        logger.info("opened clip.mp4");
        assert!(logger.summary_string().is_none());
        assert_eq!(logger.frames_seen, 0);
    }

    #[test]
    fn test_throttle_is_at_least_one() {
        let logger = StdoutAnalysisLogger::new(0);
        assert_eq!(logger.throttle_frames, 1);
    }
}
