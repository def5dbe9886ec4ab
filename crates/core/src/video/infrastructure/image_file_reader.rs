use std::path::Path;

use crate::shared::error::{StatsError, StatsResult};
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::{FrameResult, VideoReader};

/// Decodes a still image (PNG, JPEG, ...) into an RGB [`Frame`].
///
/// Any alpha channel is discarded and other color types are converted,
/// so the frame is always 3-channel RGB.
pub fn load_image(path: &Path) -> StatsResult<Frame> {
    let img = image::open(path).map_err(|e| StatsError::Open {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(Frame::from_rgb_image(img.into_rgb8(), 0))
}

/// Adapts a single image file to the [`VideoReader`] interface as a
/// one-frame source with `fps = 0`.
pub struct ImageFileReader {
    frame: Option<Frame>,
}

impl ImageFileReader {
    pub fn new() -> Self {
        Self { frame: None }
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoReader for ImageFileReader {
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
        self.close();
        let frame = load_image(path)?;
        let metadata = VideoMetadata {
            width: frame.width(),
            height: frame.height(),
            fps: 0.0,
            total_frames: 1,
            codec: String::new(),
            source_path: Some(path.to_path_buf()),
        };
        self.frame = Some(frame);
        Ok(metadata)
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = FrameResult> + '_> {
        if self.frame.is_none() {
            return Box::new(std::iter::once(Err("ImageFileReader: not opened".into())));
        }
        Box::new(self.frame.take().into_iter().map(Ok))
    }

    fn close(&mut self) {
        self.frame = None;
    }

    fn is_open(&self) -> bool {
        self.frame.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([50, 100, 200]);
        }
        img.put_pixel(0, 0, image::Rgb([1, 2, 3]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_image_is_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "test.png", 10, 8);
        let frame = load_image(&path).unwrap();
        assert_eq!(frame.width(), 10);
        assert_eq!(frame.height(), 8);
        assert_eq!(frame.channels(), 3);
        assert_eq!(&frame.data()[..6], &[1, 2, 3, 50, 100, 200]);
    }

    #[test]
    fn test_load_image_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([9, 8, 7, 10]))
            .save(&path)
            .unwrap();
        let frame = load_image(&path).unwrap();
        assert_eq!(frame.channels(), 3);
        assert_eq!(&frame.data()[..3], &[9, 8, 7]);
    }

    #[test]
    fn test_load_missing_image_is_open_error() {
        let result = load_image(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(StatsError::Open { .. })));
    }

    #[test]
    fn test_reader_yields_single_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "test.png", 10, 8);
        let mut reader = ImageFileReader::new();
        let meta = reader.open(&path).unwrap();
        assert_eq!(meta.total_frames, 1);
        assert_eq!(meta.fps, 0.0);
        assert_eq!(meta.source_path, Some(path));

        let frames: Vec<_> = reader.frames().collect();
        assert_eq!(frames.len(), 1);
        let frame = frames.into_iter().next().unwrap().unwrap();
        assert_eq!(frame.index(), 0);
        assert_eq!(frame.width(), meta.width);
        assert!(!reader.is_open());
    }

    #[test]
    fn test_frames_without_open_returns_error() {
        let mut reader = ImageFileReader::new();
        assert!(reader.frames().next().unwrap().is_err());
    }

    #[test]
    fn test_close_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "test.png", 4, 4);
        let mut reader = ImageFileReader::new();
        reader.open(&path).unwrap();
        reader.close();
        reader.close();
        assert!(!reader.is_open());
    }
}
