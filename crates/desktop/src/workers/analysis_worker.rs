use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use pixelscope_core::pipeline::analysis_logger::AnalysisLogger;
use pixelscope_core::pipeline::analyze_video_use_case::VideoAnalyzer;
use pixelscope_core::pipeline::video_frame_series::VideoFrameSeries;
use pixelscope_core::shared::constants::is_image;
use pixelscope_core::video::domain::video_reader::VideoReader;
use pixelscope_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use pixelscope_core::video::infrastructure::image_file_reader::ImageFileReader;

/// Messages sent from the analysis thread to the UI.
#[derive(Debug)]
pub enum AnalysisMessage {
    Progress(usize, usize),
    Complete(Box<VideoFrameSeries>),
    Error(String),
}

/// Forwards progress to the UI channel; everything else goes to `log`.
struct ChannelLogger {
    tx: Sender<AnalysisMessage>,
}

impl AnalysisLogger for ChannelLogger {
    fn progress(&mut self, current: usize, total: usize) {
        let _ = self.tx.send(AnalysisMessage::Progress(current, total));
    }

    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }
}

/// Runs the whole-video analysis on a background thread.
///
/// The analysis runs to completion; dropping the receiver discards its
/// result once the thread finishes.
pub fn spawn(path: PathBuf) -> Receiver<AnalysisMessage> {
    let (tx, rx) = crossbeam_channel::unbounded::<AnalysisMessage>();

    thread::spawn(move || {
        let reader: Box<dyn VideoReader> = if is_image(&path) {
            Box::new(ImageFileReader::new())
        } else {
            Box::new(FfmpegReader::new())
        };
        let mut logger = ChannelLogger { tx: tx.clone() };
        let message = match VideoAnalyzer::open(reader, &path, &mut logger) {
            Ok(analyzer) => {
                log::info!(
                    "Analyzed {} frames of {}",
                    analyzer.series().len(),
                    path.display()
                );
                AnalysisMessage::Complete(Box::new(analyzer.into_series()))
            }
            Err(e) => {
                log::error!("Analysis of {} failed: {e}", path.display());
                AnalysisMessage::Error(e.to_string())
            }
        };
        deliver(&tx, message, &path);
    });

    rx
}

/// Sends the final result, returning false when the UI has already moved
/// on to another video and dropped its receiver.
fn deliver(tx: &Sender<AnalysisMessage>, message: AnalysisMessage, path: &Path) -> bool {
    if tx.send(message).is_err() {
        log::info!("Discarding analysis of {}: video was replaced", path.display());
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deliver_reaches_listening_receiver() {
        let (tx, rx) = crossbeam_channel::unbounded();
        assert!(deliver(&tx, AnalysisMessage::Error("x".into()), Path::new("a.mp4")));
        assert!(matches!(rx.try_recv(), Ok(AnalysisMessage::Error(_))));
    }

    #[test]
    fn test_deliver_discards_after_receiver_dropped() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        assert!(!deliver(&tx, AnalysisMessage::Progress(1, 2), Path::new("a.mp4")));
    }
}
