use planar_image::{ImageBuffer, ImageError, OwnedImage, PixelBox, Region};

/// Origin of a crop in the coordinates of the image it was taken from.
///
/// Adding the offset to crop-local coordinates gives source coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CropOffset {
    /// Row of the crop origin.
    pub y: usize,
    /// Column of the crop origin.
    pub x: usize,
}

impl From<PixelBox> for CropOffset {
    fn from(pixel_box: PixelBox) -> Self {
        CropOffset {
            y: pixel_box.y1,
            x: pixel_box.x1,
        }
    }
}

/// Clip `region` to the image and round it to an inclusive pixel box.
///
/// # Errors
///
/// Returns an error if the image is empty or if the clipped region is empty.
pub fn crop_box(src: &ImageBuffer<'_>, region: Region) -> Result<PixelBox, ImageError> {
    if src.width() == 0 || src.height() == 0 {
        return Err(ImageError::InvalidImageSize(
            src.height(),
            src.width(),
            "cannot crop an empty image",
        ));
    }
    region
        .clip(src.size())
        .to_pixel_box()
        .ok_or(ImageError::InvalidRegion(
            region.x1, region.y1, region.x2, region.y2,
        ))
}

/// Copy the pixels of `src` starting at column `x` and row `y` into `dst`.
///
/// The copied block has the size of `dst`.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `dst` - The destination image to store the cropped image.
/// * `x` - The x-coordinate of the top-left corner of the region to crop.
/// * `y` - The y-coordinate of the top-left corner of the region to crop.
///
/// # Examples
///
/// ```rust
/// use planar_image::{ImageBuffer, ImageSize};
/// use planar_imgproc::crop::crop_image;
///
/// let image = ImageBuffer::from_fn(ImageSize { width: 4, height: 4 }, 1, |_, y, x| {
///     (4 * y + x) as f64
/// }).unwrap();
///
/// let mut cropped = ImageBuffer::new(ImageSize { width: 2, height: 2 }, 1).unwrap();
///
/// crop_image(&image, &mut cropped, 1, 1).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5.0, 9.0, 6.0, 10.0]);
/// ```
pub fn crop_image(
    src: &ImageBuffer<'_>,
    dst: &mut ImageBuffer<'_>,
    x: usize,
    y: usize,
) -> Result<(), ImageError> {
    if src.num_channels() != dst.num_channels() {
        return Err(ImageError::ChannelIndexOutOfBounds(
            dst.num_channels(),
            src.num_channels(),
        ));
    }
    if dst.width() > src.width().saturating_sub(x) || dst.height() > src.height().saturating_sub(y)
    {
        return Err(ImageError::PixelIndexOutOfBounds(
            x.saturating_add(dst.width()),
            y.saturating_add(dst.height()),
            src.width(),
            src.height(),
        ));
    }

    let dst_layout = *dst.layout();
    let dst_rows = dst_layout.size_y;
    let dst_data = dst.as_mut_slice()?;
    for c in 0..dst_layout.channels {
        for i in 0..dst_layout.size_x {
            // the column of the crop in the source image
            let src_column = &src.column(c, x + i)[y..y + dst_rows];

            let start = dst_layout.column_start(c, i);
            dst_data[start..start + dst_rows].copy_from_slice(src_column);
        }
    }

    Ok(())
}

/// Crop `region` out of `src` into a new buffer that owns its samples.
///
/// The region is clipped to the image and rounded to the nearest pixels. The crop
/// stays valid after `src` is dropped.
///
/// # Returns
///
/// The cropped image and its origin in `src`.
///
/// # Example
///
/// ```
/// use planar_image::{ImageBuffer, ImageSize, Region};
/// use planar_imgproc::crop::{crop, CropOffset};
///
/// let image = ImageBuffer::new(ImageSize { width: 100, height: 100 }, 3).unwrap();
///
/// let (cropped, offset) = crop(&image, Region::new(-5.0, -5.0, 10000.0, 10000.0)).unwrap();
///
/// assert_eq!(cropped.size(), ImageSize { width: 100, height: 100 });
/// assert_eq!(offset, CropOffset { y: 0, x: 0 });
/// ```
pub fn crop(
    src: &ImageBuffer<'_>,
    region: Region,
) -> Result<(OwnedImage, CropOffset), ImageError> {
    let pixel_box = crop_box(src, region)?;
    log::debug!("crop {:?} out of {}", pixel_box, src.size());

    let mut dst = ImageBuffer::new(pixel_box.size(), src.num_channels())?;
    crop_image(src, &mut dst, pixel_box.x1, pixel_box.y1)?;

    Ok((dst, pixel_box.into()))
}

/// Crop `region` out of `src` without copying.
///
/// The result is a read-only view sharing the storage and the strides of `src`; it
/// borrows `src` and cannot outlive it. Dropping the view leaves `src` untouched.
///
/// # Returns
///
/// The aliasing view and its origin in `src`.
pub fn crop_shared<'a>(
    src: &'a ImageBuffer<'_>,
    region: Region,
) -> Result<(ImageBuffer<'a>, CropOffset), ImageError> {
    let pixel_box = crop_box(src, region)?;
    log::debug!("shared crop {:?} out of {}", pixel_box, src.size());

    Ok((src.view(pixel_box)?, pixel_box.into()))
}

/// Crop `region` out of `src` without copying, allowing writes through the crop.
///
/// # Errors
///
/// Returns an error if the region is empty or if `src` is a read-only view.
pub fn crop_shared_mut<'a>(
    src: &'a mut ImageBuffer<'_>,
    region: Region,
) -> Result<(ImageBuffer<'a>, CropOffset), ImageError> {
    let pixel_box = crop_box(src, region)?;
    log::debug!("shared mutable crop {:?} out of {}", pixel_box, src.size());

    Ok((src.view_mut(pixel_box)?, pixel_box.into()))
}
