use crate::image::ImageSize;

/// A floating point box in pixel coordinates, `(x1, y1)` top-left and `(x2, y2)`
/// bottom-right, both inclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Region {
    /// Left column.
    pub x1: f64,
    /// Top row.
    pub y1: f64,
    /// Right column.
    pub x2: f64,
    /// Bottom row.
    pub y2: f64,
}

/// An integer box, inclusive on both ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelBox {
    /// Left column.
    pub x1: usize,
    /// Top row.
    pub y1: usize,
    /// Right column.
    pub x2: usize,
    /// Bottom row.
    pub y2: usize,
}

impl Region {
    /// Create a new region from its corners.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width of the region, `x2 - x1`.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Height of the region, `y2 - y1`.
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Center of the region as `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (self.x1 + 0.5 * self.width(), self.y1 + 0.5 * self.height())
    }

    /// Clamp every corner component to the valid pixel range of `size`.
    ///
    /// The image must not be empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar_image::{ImageSize, Region};
    ///
    /// let size = ImageSize { width: 100, height: 100 };
    /// let clipped = Region::new(-5.0, -5.0, 10000.0, 10000.0).clip(size);
    /// assert_eq!(clipped, Region::new(0.0, 0.0, 99.0, 99.0));
    /// ```
    pub fn clip(&self, size: ImageSize) -> Self {
        let max_x = size.width.saturating_sub(1) as f64;
        let max_y = size.height.saturating_sub(1) as f64;
        Self {
            x1: self.x1.clamp(0.0, max_x),
            y1: self.y1.clamp(0.0, max_y),
            x2: self.x2.clamp(0.0, max_x),
            y2: self.y2.clamp(0.0, max_y),
        }
    }

    /// Round a clipped region to the nearest integer box, halves rounding up.
    ///
    /// Returns `None` when the box is empty, i.e. `x1 > x2` or `y1 > y2` after rounding,
    /// or when a component is negative or not finite.
    pub fn to_pixel_box(&self) -> Option<PixelBox> {
        let round = |v: f64| -> Option<usize> {
            if v.is_finite() && v >= 0.0 {
                Some((v + 0.5).floor() as usize)
            } else {
                None
            }
        };
        let pixel_box = PixelBox {
            x1: round(self.x1)?,
            y1: round(self.y1)?,
            x2: round(self.x2)?,
            y2: round(self.y2)?,
        };
        if pixel_box.x1 > pixel_box.x2 || pixel_box.y1 > pixel_box.y2 {
            return None;
        }
        Some(pixel_box)
    }
}

impl PixelBox {
    /// Number of columns covered by the box.
    pub fn width(&self) -> usize {
        self.x2 - self.x1 + 1
    }

    /// Number of rows covered by the box.
    pub fn height(&self) -> usize {
        self.y2 - self.y1 + 1
    }

    /// Size of the box in pixels.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Whether the box lies inside an image of the given size.
    pub fn fits(&self, size: ImageSize) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2 && self.x2 < size.width && self.y2 < size.height
    }
}
