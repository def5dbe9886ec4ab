use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

pub type FrameResult = Result<Frame, Box<dyn std::error::Error>>;

/// A source of RGB frames: a video file or a still image.
///
/// Implementations own the decoder handle between `open` and `close`.
/// Iteration ends at end of stream; a yielded `Err` is a decode failure
/// which callers may treat as the end of readable frames.
pub trait VideoReader: Send {
    /// Opens a source and returns its metadata, replacing any open source.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Frames in decode order, starting at index 0.
    fn frames(&mut self) -> Box<dyn Iterator<Item = FrameResult> + '_>;

    /// Releases the decoder handle. Safe to call more than once.
    fn close(&mut self);

    fn is_open(&self) -> bool;
}
