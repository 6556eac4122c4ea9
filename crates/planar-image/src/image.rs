use crate::{
    error::ImageError,
    layout::PlaneLayout,
    region::PixelBox,
    storage::Storage,
};

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use planar_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// An image with `f64` samples stored as channel planes.
///
/// Inside a plane the samples are column-major: walking down a column is a unit step,
/// moving to the next column skips `step_y` samples and moving to the next channel
/// plane skips `step_yx` samples. See [`PlaneLayout`] for the addressing rule.
///
/// A buffer either owns its storage or is an aliasing view into another buffer, as
/// created by [`ImageBuffer::view`] and [`ImageBuffer::view_mut`]. Dropping a view never
/// releases the storage it points into.
#[derive(Debug)]
pub struct ImageBuffer<'a> {
    storage: Storage<'a>,
    layout: PlaneLayout,
}

/// A buffer that owns its samples.
pub type OwnedImage = ImageBuffer<'static>;

fn checked_numel(size: ImageSize, channels: usize) -> Result<usize, ImageError> {
    size.width
        .checked_mul(size.height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(ImageError::InvalidImageSize(
            size.height,
            size.width,
            "sample count overflows",
        ))
}

impl ImageBuffer<'static> {
    /// Create a new zero-filled image.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of channel planes.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar_image::{ImageBuffer, ImageSize};
    ///
    /// let image = ImageBuffer::new(ImageSize { width: 10, height: 20 }, 3).unwrap();
    ///
    /// assert_eq!(image.width(), 10);
    /// assert_eq!(image.height(), 20);
    /// assert_eq!(image.step_y(), 20);
    /// assert_eq!(image.step_yx(), 200);
    /// assert_eq!(image.get(2, 19, 9), Some(0.0));
    /// ```
    pub fn new(size: ImageSize, channels: usize) -> Result<Self, ImageError> {
        let numel = checked_numel(size, channels)?;
        Self::from_planes(size, channels, vec![0.0; numel])
    }

    /// Create a new image with every sample of channel `c` set to `values[c]`.
    ///
    /// The number of values defines the number of channels.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar_image::{ImageBuffer, ImageSize};
    ///
    /// let image = ImageBuffer::from_channel_values(
    ///     ImageSize { width: 2, height: 2 },
    ///     &[1.0, 2.0, 3.0],
    /// ).unwrap();
    ///
    /// assert_eq!(image.num_channels(), 3);
    /// assert_eq!(image.get(1, 1, 0), Some(2.0));
    /// ```
    pub fn from_channel_values(size: ImageSize, values: &[f64]) -> Result<Self, ImageError> {
        let plane_len = checked_numel(size, 1)?;
        checked_numel(size, values.len())?;
        let data = values
            .iter()
            .flat_map(|&v| std::iter::repeat(v).take(plane_len))
            .collect();
        Self::from_planes(size, values.len(), data)
    }

    /// Create an image from plane-major, column-major sample data.
    ///
    /// # Errors
    ///
    /// If the length of the data does not match the image size, an error is returned.
    pub fn from_planes(
        size: ImageSize,
        channels: usize,
        data: Vec<f64>,
    ) -> Result<Self, ImageError> {
        let numel = checked_numel(size, channels)?;
        if data.len() != numel {
            return Err(ImageError::InvalidChannelShape(data.len(), numel));
        }

        Ok(Self {
            storage: Storage::Owned(data),
            layout: PlaneLayout::compact(size.height, size.width, channels),
        })
    }

    /// Create an image by evaluating `f(c, y, x)` for every sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar_image::{ImageBuffer, ImageSize};
    ///
    /// let image = ImageBuffer::from_fn(ImageSize { width: 3, height: 2 }, 1, |_, y, x| {
    ///     (10 * y + x) as f64
    /// }).unwrap();
    ///
    /// assert_eq!(image.get(0, 1, 2), Some(12.0));
    /// ```
    pub fn from_fn<F>(size: ImageSize, channels: usize, mut f: F) -> Result<Self, ImageError>
    where
        F: FnMut(usize, usize, usize) -> f64,
    {
        let numel = checked_numel(size, channels)?;
        let mut data = Vec::with_capacity(numel);
        for c in 0..channels {
            for x in 0..size.width {
                for y in 0..size.height {
                    data.push(f(c, y, x));
                }
            }
        }
        Self::from_planes(size, channels, data)
    }
}

impl<'a> ImageBuffer<'a> {
    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.layout.size_x,
            height: self.layout.size_y,
        }
    }

    /// Get the width (number of columns) of the image.
    pub fn width(&self) -> usize {
        self.layout.size_x
    }

    /// Get the height (number of rows) of the image.
    pub fn height(&self) -> usize {
        self.layout.size_y
    }

    /// Get the number of channel planes.
    pub fn num_channels(&self) -> usize {
        self.layout.channels
    }

    /// The image shape as `[height, width, channels]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.layout.size_y, self.layout.size_x, self.layout.channels]
    }

    /// The strided layout of the image.
    pub fn layout(&self) -> &PlaneLayout {
        &self.layout
    }

    /// Stride between consecutive columns of one plane.
    pub fn step_y(&self) -> usize {
        self.layout.step_y
    }

    /// Stride between consecutive channel planes.
    pub fn step_yx(&self) -> usize {
        self.layout.step_yx
    }

    /// Offset of sample `(0, 0, 0)` inside the storage.
    pub fn offset(&self) -> usize {
        self.layout.offset
    }

    /// Whether the buffer is a view into the storage of another buffer.
    pub fn is_aliased(&self) -> bool {
        self.storage.is_aliased()
    }

    /// Whether the image holds no sample.
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// The sample storage.
    pub fn storage(&self) -> &Storage<'a> {
        &self.storage
    }

    /// The whole underlying storage, including samples outside of a view.
    pub fn as_slice(&self) -> &[f64] {
        self.storage.as_slice()
    }

    /// The whole underlying storage as a mutable slice.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ReadOnlyView`] for read-only views.
    pub fn as_mut_slice(&mut self) -> Result<&mut [f64], ImageError> {
        self.storage.as_mut_slice().ok_or(ImageError::ReadOnlyView)
    }

    /// Get the sample of channel `c` at row `y` and column `x`.
    pub fn get(&self, c: usize, y: usize, x: usize) -> Option<f64> {
        self.layout
            .checked_index(c, y, x)
            .and_then(|idx| self.as_slice().get(idx).copied())
    }

    /// Get the sample of channel `c` at row `y` and column `x`.
    ///
    /// # Panics
    ///
    /// Panics if the index is outside the image.
    #[inline]
    pub fn at(&self, c: usize, y: usize, x: usize) -> f64 {
        assert!(
            c < self.layout.channels && y < self.layout.size_y && x < self.layout.size_x,
            "sample ({c}, {y}, {x}) is out of bounds"
        );
        self.as_slice()[self.layout.index(c, y, x)]
    }

    /// Set the sample of channel `c` at row `y` and column `x`.
    pub fn set(&mut self, c: usize, y: usize, x: usize, value: f64) -> Result<(), ImageError> {
        if c >= self.layout.channels {
            return Err(ImageError::ChannelIndexOutOfBounds(c, self.layout.channels));
        }
        let idx = self.layout.checked_index(c, y, x).ok_or(
            ImageError::PixelIndexOutOfBounds(x, y, self.width(), self.height()),
        )?;
        self.as_mut_slice()?[idx] = value;
        Ok(())
    }

    /// The rows of column `x` in channel `c`, a contiguous slice of `height()` samples.
    ///
    /// # Panics
    ///
    /// Panics if the channel or the column is outside the image.
    pub fn column(&self, c: usize, x: usize) -> &[f64] {
        assert!(c < self.layout.channels && x < self.layout.size_x);
        let start = self.layout.column_start(c, x);
        &self.as_slice()[start..start + self.layout.size_y]
    }

    /// Overwrite every sample of channel `c` with `values[c]`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer values than channels are given or if the buffer is a
    /// read-only view.
    pub fn fill_channels(&mut self, values: &[f64]) -> Result<(), ImageError> {
        if values.len() < self.layout.channels {
            return Err(ImageError::InvalidChannelValues(
                values.len(),
                self.layout.channels,
            ));
        }
        let layout = self.layout;
        let data = self.as_mut_slice()?;
        for (c, &value) in values.iter().enumerate().take(layout.channels) {
            for x in 0..layout.size_x {
                let start = layout.column_start(c, x);
                data[start..start + layout.size_y].fill(value);
            }
        }
        Ok(())
    }

    /// Create a read-only view of the pixels inside `pixel_box`.
    ///
    /// The view shares the storage and the strides of this buffer and starts at the box
    /// origin. It cannot outlive this buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar_image::{ImageBuffer, ImageSize, PixelBox};
    ///
    /// let image = ImageBuffer::from_fn(ImageSize { width: 4, height: 4 }, 1, |_, y, x| {
    ///     (4 * y + x) as f64
    /// }).unwrap();
    ///
    /// let view = image.view(PixelBox { x1: 1, y1: 2, x2: 2, y2: 3 }).unwrap();
    ///
    /// assert!(view.is_aliased());
    /// assert_eq!(view.step_y(), 4);
    /// assert_eq!(view.get(0, 0, 0), Some(9.0));
    /// assert_eq!(view.get(0, 1, 1), Some(14.0));
    /// ```
    pub fn view(&self, pixel_box: PixelBox) -> Result<ImageBuffer<'_>, ImageError> {
        let layout = self.sub_layout(pixel_box)?;
        let storage = Storage::Borrowed(self.as_slice());
        layout.validate(storage.len())?;
        Ok(ImageBuffer { storage, layout })
    }

    /// Create a writable view of the pixels inside `pixel_box`.
    ///
    /// Writes through the view land in the storage of this buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the box is outside the image or if this buffer is itself a
    /// read-only view.
    pub fn view_mut(&mut self, pixel_box: PixelBox) -> Result<ImageBuffer<'_>, ImageError> {
        let layout = self.sub_layout(pixel_box)?;
        let data = self.storage.as_mut_slice().ok_or(ImageError::ReadOnlyView)?;
        layout.validate(data.len())?;
        Ok(ImageBuffer {
            storage: Storage::BorrowedMut(data),
            layout,
        })
    }

    fn sub_layout(&self, pixel_box: PixelBox) -> Result<PlaneLayout, ImageError> {
        if !pixel_box.fits(self.size()) {
            return Err(ImageError::PixelIndexOutOfBounds(
                pixel_box.x2,
                pixel_box.y2,
                self.width(),
                self.height(),
            ));
        }
        Ok(self.layout.sub_layout(
            pixel_box.y1,
            pixel_box.x1,
            pixel_box.height(),
            pixel_box.width(),
        ))
    }

    /// Copy the samples into a new, compact buffer that owns its storage.
    pub fn to_owned_buffer(&self) -> OwnedImage {
        let layout = self.layout;
        let src = self.as_slice();
        let mut data = Vec::with_capacity(layout.numel());
        for c in 0..layout.channels {
            for x in 0..layout.size_x {
                let start = layout.column_start(c, x);
                data.extend_from_slice(&src[start..start + layout.size_y]);
            }
        }
        ImageBuffer {
            storage: Storage::Owned(data),
            layout: PlaneLayout::compact(layout.size_y, layout.size_x, layout.channels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageBuffer, ImageSize};
    use crate::{error::ImageError, region::PixelBox};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = ImageBuffer::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            3,
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.shape(), [20, 10, 3]);
        assert_eq!(image.step_y(), 20);
        assert_eq!(image.step_yx(), 200);
        assert!(!image.is_aliased());
        Ok(())
    }

    #[test]
    fn image_from_planes() -> Result<(), ImageError> {
        // two columns of three rows, one channel
        let image = ImageBuffer::from_planes(
            ImageSize {
                width: 2,
                height: 3,
            },
            1,
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
        )?;
        assert_eq!(image.get(0, 2, 0), Some(2.0));
        assert_eq!(image.get(0, 0, 1), Some(3.0));
        assert_eq!(image.column(0, 1), &[3.0, 4.0, 5.0]);
        Ok(())
    }

    #[test]
    fn image_from_planes_wrong_len() {
        let res = ImageBuffer::from_planes(
            ImageSize {
                width: 2,
                height: 2,
            },
            3,
            vec![0.0; 11],
        );
        assert_eq!(res.err(), Some(ImageError::InvalidChannelShape(11, 12)));
    }

    #[test]
    fn image_channel_values() -> Result<(), ImageError> {
        let image = ImageBuffer::from_channel_values(
            ImageSize {
                width: 3,
                height: 2,
            },
            &[1.0, -2.0],
        )?;
        assert_eq!(image.num_channels(), 2);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(image.get(0, y, x), Some(1.0));
                assert_eq!(image.get(1, y, x), Some(-2.0));
            }
        }
        Ok(())
    }

    #[test]
    fn image_fill_channels() -> Result<(), ImageError> {
        let mut image = ImageBuffer::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            3,
        )?;
        image.fill_channels(&[4.0, 5.0, 6.0])?;
        assert_eq!(image.as_slice()[..4], [4.0; 4]);
        assert_eq!(image.as_slice()[4..8], [5.0; 4]);
        assert_eq!(image.as_slice()[8..], [6.0; 4]);

        assert_eq!(
            image.fill_channels(&[1.0]),
            Err(ImageError::InvalidChannelValues(1, 3))
        );
        Ok(())
    }

    #[test]
    fn image_set_and_get() -> Result<(), ImageError> {
        let mut image = ImageBuffer::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            2,
        )?;
        image.set(1, 1, 2, 7.5)?;
        assert_eq!(image.get(1, 1, 2), Some(7.5));
        assert_eq!(image.at(1, 1, 2), 7.5);
        assert_eq!(image.get(1, 2, 2), None);
        assert_eq!(
            image.set(2, 0, 0, 1.0),
            Err(ImageError::ChannelIndexOutOfBounds(2, 2))
        );
        assert_eq!(
            image.set(0, 0, 3, 1.0),
            Err(ImageError::PixelIndexOutOfBounds(3, 0, 3, 2))
        );
        Ok(())
    }

    #[test]
    fn view_shares_storage() -> Result<(), ImageError> {
        let image = ImageBuffer::from_fn(
            ImageSize {
                width: 5,
                height: 4,
            },
            2,
            |c, y, x| (100 * c + 10 * y + x) as f64,
        )?;
        let pixel_box = PixelBox {
            x1: 1,
            y1: 1,
            x2: 3,
            y2: 2,
        };
        let view = image.view(pixel_box)?;
        assert!(view.is_aliased());
        assert_eq!(view.shape(), [2, 3, 2]);
        assert_eq!(view.step_y(), image.step_y());
        assert_eq!(view.step_yx(), image.step_yx());
        assert_eq!(view.offset(), 5);
        assert_eq!(view.get(1, 1, 2), Some(123.0));
        assert_eq!(view.column(0, 0), &[11.0, 21.0]);

        // nested views accumulate the offset
        let inner = view.view(PixelBox {
            x1: 1,
            y1: 1,
            x2: 2,
            y2: 1,
        })?;
        assert_eq!(inner.get(0, 0, 0), Some(22.0));
        assert_eq!(inner.get(1, 0, 1), Some(123.0));
        Ok(())
    }

    #[test]
    fn view_out_of_bounds() -> Result<(), ImageError> {
        let image = ImageBuffer::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            1,
        )?;
        let res = image.view(PixelBox {
            x1: 0,
            y1: 0,
            x2: 3,
            y2: 1,
        });
        assert!(res.is_err());
        Ok(())
    }

    #[test]
    fn read_only_view_rejects_writes() -> Result<(), ImageError> {
        let image = ImageBuffer::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            1,
        )?;
        let mut view = image.view(PixelBox {
            x1: 0,
            y1: 0,
            x2: 1,
            y2: 1,
        })?;
        assert_eq!(view.set(0, 0, 0, 1.0), Err(ImageError::ReadOnlyView));
        assert_eq!(view.fill_channels(&[1.0]), Err(ImageError::ReadOnlyView));
        Ok(())
    }

    #[test]
    fn view_mut_writes_through() -> Result<(), ImageError> {
        let mut image = ImageBuffer::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            1,
        )?;
        {
            let mut view = image.view_mut(PixelBox {
                x1: 1,
                y1: 1,
                x2: 2,
                y2: 2,
            })?;
            view.fill_channels(&[3.0])?;
        }
        for y in 0..4 {
            for x in 0..4 {
                let inside = (1..=2).contains(&y) && (1..=2).contains(&x);
                let expected = if inside { 3.0 } else { 0.0 };
                assert_eq!(image.get(0, y, x), Some(expected));
            }
        }
        Ok(())
    }

    #[test]
    fn to_owned_buffer_compacts() -> Result<(), ImageError> {
        let image = ImageBuffer::from_fn(
            ImageSize {
                width: 4,
                height: 3,
            },
            3,
            |c, y, x| (c * 12 + x * 3 + y) as f64,
        )?;
        let view = image.view(PixelBox {
            x1: 1,
            y1: 1,
            x2: 2,
            y2: 2,
        })?;
        let owned = view.to_owned_buffer();
        assert!(!owned.is_aliased());
        assert_eq!(owned.step_y(), 2);
        assert_eq!(owned.step_yx(), 4);
        assert_eq!(owned.as_slice().len(), 12);
        for c in 0..3 {
            for y in 0..2 {
                for x in 0..2 {
                    assert_eq!(owned.get(c, y, x), view.get(c, y, x));
                }
            }
        }
        Ok(())
    }
}
