use ndarray::{s, ArrayView3};

use crate::shared::error::StatsResult;
use crate::shared::region::Region;

/// A still image or one decoded video frame: contiguous RGB bytes in
/// row-major order.
///
/// Channel order is always R, G, B. Readers convert at the I/O boundary.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn from_rgb_image(img: image::RgbImage, index: usize) -> Self {
        let (width, height) = img.dimensions();
        Self::new(img.into_raw(), width, height, 3, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies `region` into a new frame with the same index.
    pub fn crop(&self, region: &Region) -> StatsResult<Frame> {
        region.check_within(self.width, self.height)?;
        let view = self.as_ndarray();
        let window = view.slice(s![
            region.upper() as usize..region.bottom() as usize,
            region.left() as usize..region.right() as usize,
            ..
        ]);
        let data: Vec<u8> = window.iter().copied().collect();
        Ok(Frame::new(
            data,
            region.width(),
            region.height(),
            self.channels,
            self.index,
        ))
    }

    /// RGBA copy of an RGB frame, the layout GUI image handles expect.
    pub fn to_rgba(&self) -> Vec<u8> {
        let channels = self.channels as usize;
        let mut out = Vec::with_capacity(self.pixel_count() * 4);
        for px in self.data.chunks_exact(channels) {
            out.extend_from_slice(&px[..3.min(channels)]);
            out.extend(std::iter::repeat(0).take(3usize.saturating_sub(channels)));
            out.push(255);
        }
        out
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
