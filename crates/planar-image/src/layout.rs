use crate::error::ImageError;

/// Strided addressing of a channel-planar, column-major image.
///
/// Sample `(c, y, x)` lives at `offset + c * step_yx + x * step_y + y`. Rows of one
/// column are contiguous, columns are `step_y` apart and channel planes are `step_yx`
/// apart. Owned buffers use the compact strides returned by [`PlaneLayout::compact`];
/// aliasing views keep the strides of the buffer they were taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneLayout {
    /// Number of rows.
    pub size_y: usize,
    /// Number of columns.
    pub size_x: usize,
    /// Number of channel planes.
    pub channels: usize,
    /// Stride between consecutive columns of one plane.
    pub step_y: usize,
    /// Stride between consecutive channel planes.
    pub step_yx: usize,
    /// Element offset of sample `(0, 0, 0)` inside the storage.
    pub offset: usize,
}

impl PlaneLayout {
    /// Compact layout of a freshly allocated buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar_image::PlaneLayout;
    ///
    /// let layout = PlaneLayout::compact(4, 3, 2);
    /// assert_eq!(layout.step_y, 4);
    /// assert_eq!(layout.step_yx, 12);
    /// assert_eq!(layout.index(1, 2, 1), 12 + 4 + 2);
    /// ```
    pub fn compact(size_y: usize, size_x: usize, channels: usize) -> Self {
        Self {
            size_y,
            size_x,
            channels,
            step_y: size_y,
            step_yx: size_y * size_x,
            offset: 0,
        }
    }

    /// Number of samples addressed by the layout.
    #[inline]
    pub fn numel(&self) -> usize {
        self.size_y * self.size_x * self.channels
    }

    /// Whether the layout addresses no sample at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    /// Storage index of sample `(c, y, x)`, without bounds checking.
    #[inline]
    pub fn index(&self, c: usize, y: usize, x: usize) -> usize {
        self.offset + c * self.step_yx + x * self.step_y + y
    }

    /// Storage index of sample `(c, y, x)` if it lies inside the image.
    #[inline]
    pub fn checked_index(&self, c: usize, y: usize, x: usize) -> Option<usize> {
        if c < self.channels && y < self.size_y && x < self.size_x {
            Some(self.index(c, y, x))
        } else {
            None
        }
    }

    /// Storage index of the first row of column `x` in plane `c`.
    #[inline]
    pub fn column_start(&self, c: usize, x: usize) -> usize {
        self.index(c, 0, x)
    }

    /// Smallest storage length that holds every addressed sample.
    pub fn required_len(&self) -> usize {
        if self.is_empty() {
            return self.offset;
        }
        self.index(self.channels - 1, self.size_y - 1, self.size_x - 1) + 1
    }

    /// Layout of the sub-box whose top-left corner is `(y, x)`, sharing the strides.
    pub fn sub_layout(&self, y: usize, x: usize, size_y: usize, size_x: usize) -> Self {
        Self {
            size_y,
            size_x,
            channels: self.channels,
            step_y: self.step_y,
            step_yx: self.step_yx,
            offset: self.offset + x * self.step_y + y,
        }
    }

    /// Check that the layout is well formed and fits in `storage_len` elements.
    pub fn validate(&self, storage_len: usize) -> Result<(), ImageError> {
        if self.is_empty() {
            return Ok(());
        }
        if self.step_y < self.size_y || self.step_yx < self.step_y * (self.size_x - 1) + self.size_y
        {
            return Err(ImageError::InvalidImageSize(
                self.size_y,
                self.size_x,
                "strides overlap",
            ));
        }
        let required = self.required_len();
        if required > storage_len {
            return Err(ImageError::LayoutOutOfBounds(required, storage_len));
        }
        Ok(())
    }
}
