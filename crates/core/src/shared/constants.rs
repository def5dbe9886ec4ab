/// File opened by the magnifier when the user does not pick one.
pub const DEFAULT_IMAGE_NAME: &str = "image.jpg";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm", "m4v"];

/// Half-size of the magnifier window in pixels (window is `2r + 1` wide).
pub const DEFAULT_WINDOW_RADIUS: u32 = 10;

pub const DEFAULT_ZOOM: u32 = 8;

/// Delay between displayed frames during playback.
pub const DEFAULT_PLAYBACK_INTERVAL_MS: u64 = 50;

/// ITU-R BT.601 luma weights for R, G, B.
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

pub const HISTOGRAM_BINS: usize = 256;

pub const CHANNEL_NAMES: [&str; 3] = ["R", "G", "B"];

pub fn is_image(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case::png("photo.png", true)]
    #[case::upper_case("PHOTO.JPG", true)]
    #[case::video("clip.mp4", false)]
    #[case::no_extension("README", false)]
    fn test_is_image(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_image(Path::new(name)), expected);
    }

    #[test]
    fn test_luma_weights_sum_to_one() {
        let sum: f64 = LUMA_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
