use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use iced::widget::image;

use pixelscope_core::shared::frame::Frame;
use pixelscope_core::statistics::frame_stats::{frame_stats, FrameStats};
use pixelscope_core::video::domain::video_reader::VideoReader;
use pixelscope_core::video::infrastructure::ffmpeg_reader::FfmpegReader;

/// Frames buffered ahead of the UI.
const QUEUE_DEPTH: usize = 2;

pub enum PlaybackMessage {
    /// A decoded frame ready to show, with its statistics already computed.
    Frame {
        handle: image::Handle,
        index: usize,
        stats: FrameStats,
    },
    Error(String),
}

/// A running playback thread. Dropping the handle stops the thread, which
/// then releases its decoder.
pub struct PlaybackHandle {
    pub rx: Receiver<PlaybackMessage>,
    stop: Arc<AtomicBool>,
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Decodes `path` in a loop, emitting one frame per `interval` and
/// restarting from frame 0 at end of stream.
pub fn spawn(path: PathBuf, interval: Duration) -> PlaybackHandle {
    let (tx, rx) = crossbeam_channel::bounded::<PlaybackMessage>(QUEUE_DEPTH);
    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = stop.clone();

    thread::spawn(move || {
        if let Err(e) = run_playback(&tx, &stop_clone, &path, interval) {
            log::error!("Playback of {} failed: {e}", path.display());
            let _ = tx.send(PlaybackMessage::Error(e.to_string()));
        }
        log::debug!("Playback of {} stopped", path.display());
    });

    PlaybackHandle { rx, stop }
}

fn run_playback(
    tx: &Sender<PlaybackMessage>,
    stop: &AtomicBool,
    path: &std::path::Path,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = FfmpegReader::new();

    while !stop.load(Ordering::Relaxed) {
        reader.open(path)?;
        let mut shown = 0usize;
        for result in reader.frames() {
            if stop.load(Ordering::Relaxed) {
                return Ok(());
            }
            let Ok(frame) = result else {
                break;
            };
            if tx.send(prepare_frame(&frame)).is_err() {
                // UI dropped the receiver
                return Ok(());
            }
            shown += 1;
            thread::sleep(interval);
        }
        if shown == 0 {
            return Err("no playable frames".into());
        }
    }
    Ok(())
}

/// Converts a decoded frame for display off the UI thread.
fn prepare_frame(frame: &Frame) -> PlaybackMessage {
    match frame_stats(frame) {
        Ok(stats) => PlaybackMessage::Frame {
            handle: image::Handle::from_rgba(frame.width(), frame.height(), frame.to_rgba()),
            index: frame.index(),
            stats,
        },
        Err(e) => PlaybackMessage::Error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prepare_frame_carries_index_and_stats() {
        let frame = Frame::new(vec![10, 20, 30, 10, 20, 30], 2, 1, 3, 7);
        match prepare_frame(&frame) {
            PlaybackMessage::Frame { index, stats, .. } => {
                assert_eq!(index, 7);
                assert_relative_eq!(stats.mean[1], 20.0);
                assert_relative_eq!(stats.contrast, 0.0);
            }
            PlaybackMessage::Error(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn test_prepare_frame_reports_non_rgb_frames() {
        let frame = Frame::new(vec![0; 4], 2, 2, 1, 0);
        assert!(matches!(prepare_frame(&frame), PlaybackMessage::Error(_)));
    }
}
