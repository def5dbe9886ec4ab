use crate::shared::error::{StatsError, StatsResult};

/// An axis-aligned pixel rectangle `(left, upper, right, bottom)`.
///
/// `right` and `bottom` are exclusive, so a region covering a whole
/// `w x h` image is `(0, 0, w, h)`. Fields are private so every region
/// satisfies `left <= right` and `upper <= bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    left: u32,
    upper: u32,
    right: u32,
    bottom: u32,
}

impl Region {
    pub fn new(left: u32, upper: u32, right: u32, bottom: u32) -> StatsResult<Self> {
        if left > right || upper > bottom {
            return Err(StatsError::InvalidArgument(format!(
                "inverted region ({left}, {upper}, {right}, {bottom})"
            )));
        }
        Ok(Self {
            left,
            upper,
            right,
            bottom,
        })
    }

    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            upper: 0,
            right: width,
            bottom: height,
        }
    }

    /// Square window of side `2 * radius + 1` centred on `(x, y)`, clamped
    /// to a `width x height` image.
    ///
    /// Near an edge the window shrinks rather than shifting, so the cursor
    /// pixel always stays at the same offset from the clamped side.
    pub fn around(x: u32, y: u32, radius: u32, width: u32, height: u32) -> Self {
        let clamp_axis = |c: u32, limit: u32| {
            let lo = c.saturating_sub(radius).min(limit);
            let hi = c.saturating_add(radius).saturating_add(1).min(limit);
            (lo, hi.max(lo))
        };
        let (left, right) = clamp_axis(x, width);
        let (upper, bottom) = clamp_axis(y, height);
        Self {
            left,
            upper,
            right,
            bottom,
        }
    }

    pub fn left(&self) -> u32 {
        self.left
    }

    pub fn upper(&self) -> u32 {
        self.upper
    }

    pub fn right(&self) -> u32 {
        self.right
    }

    pub fn bottom(&self) -> u32 {
        self.bottom
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.upper
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// True when the region lies inside a `width x height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right <= width && self.bottom <= height
    }

    /// Like [`Region::fits_within`], as an error for the slicing callers.
    pub fn check_within(&self, width: u32, height: u32) -> StatsResult<()> {
        if self.fits_within(width, height) {
            return Ok(());
        }
        Err(StatsError::RegionOutOfBounds {
            left: self.left,
            upper: self.upper,
            right: self.right,
            bottom: self.bottom,
            width,
            height,
        })
    }
}
