use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Frame count reported by the container; 0 when unknown.
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Frame count if the source reported one.
    pub fn known_frame_count(&self) -> Option<usize> {
        (self.total_frames > 0).then_some(self.total_frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(total_frames: usize) -> VideoMetadata {
        VideoMetadata {
            width: 640,
            height: 480,
            fps: 25.0,
            total_frames,
            codec: "mpeg4".to_string(),
            source_path: None,
        }
    }

    #[test]
    fn test_known_frame_count() {
        assert_eq!(meta(120).known_frame_count(), Some(120));
    }

    #[test]
    fn test_unknown_frame_count() {
        assert_eq!(meta(0).known_frame_count(), None);
    }

    #[test]
    fn test_still_image_metadata() {
        // Still images are one-frame sources with fps=0
        let m = VideoMetadata {
            fps: 0.0,
            codec: String::new(),
            ..meta(1)
        };
        assert_eq!(m.known_frame_count(), Some(1));
        assert_eq!(m.fps, 0.0);
    }
}
