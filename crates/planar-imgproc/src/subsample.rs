use planar_image::{ImageBuffer, ImageError, ImageSize, OwnedImage};

use crate::{
    kernel::AreaWeights,
    separable::{check_resample_channels, scaled_size, transposed_pass},
};

/// Shrink an image by `scale` taking the area-weighted mean of the covered samples.
///
/// Each destination pixel is the exact box-filter average of the source region it
/// back-projects onto. The destination size is `size * scale` rounded half up on both
/// axes.
///
/// # Arguments
///
/// * `src` - The source image, with at most three channels.
/// * `scale` - The scale factor, `0 < scale <= 1`.
///
/// # Errors
///
/// Returns an error if the scale is out of range or if the image has more than three
/// channels.
///
/// # Example
///
/// ```
/// use planar_image::{ImageBuffer, ImageSize};
/// use planar_imgproc::subsample::subsample;
///
/// let image = ImageBuffer::from_channel_values(
///     ImageSize { width: 4, height: 4 },
///     &[7.0],
/// ).unwrap();
///
/// let small = subsample(&image, 0.5).unwrap();
///
/// assert_eq!(small.size(), ImageSize { width: 2, height: 2 });
/// assert_eq!(small.get(0, 1, 1), Some(7.0));
/// ```
pub fn subsample(src: &ImageBuffer<'_>, scale: f64) -> Result<OwnedImage, ImageError> {
    if !(scale > 0.0 && scale <= 1.0) {
        return Err(ImageError::InvalidScale(scale, "expected 0 < scale <= 1"));
    }
    check_resample_channels(src)?;

    let dst_size = scaled_size(src.size(), scale);
    log::debug!(
        "subsample {}x{} -> {}x{}",
        src.width(),
        src.height(),
        dst_size.width,
        dst_size.height
    );

    let channels = src.num_channels();
    let mut dst = ImageBuffer::new(dst_size, channels)?;
    let mut tmp = ImageBuffer::new(
        ImageSize {
            width: dst_size.height,
            height: src.width(),
        },
        channels,
    )?;

    // shrink the columns, transposed
    subsample_transposed(src, &mut tmp)?;
    // shrink the old rows, transposed back
    subsample_transposed(&tmp, &mut dst)?;

    Ok(dst)
}

/// Shrink every column of `src` to `dst.width()` samples, storing column `x` as row
/// `x` of `dst`. The destination must be zeroed.
fn subsample_transposed(
    src: &ImageBuffer<'_>,
    dst: &mut ImageBuffer<'_>,
) -> Result<(), ImageError> {
    let weights = AreaWeights::new(src.height(), dst.width(), dst.step_y())?;
    transposed_pass(src, dst, src.num_channels(), |column, line| {
        weights.apply(column, line.as_raw_mut())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn subsample_constant() -> Result<(), ImageError> {
        let image = ImageBuffer::from_channel_values(
            ImageSize {
                width: 4,
                height: 4,
            },
            &[7.0],
        )?;
        let small = subsample(&image, 0.5)?;
        assert_eq!(small.shape(), [2, 2, 1]);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(small.get(0, y, x), Some(7.0));
            }
        }
        Ok(())
    }

    #[test]
    fn subsample_block_means() -> Result<(), ImageError> {
        let image = ImageBuffer::from_fn(
            ImageSize {
                width: 4,
                height: 4,
            },
            3,
            |c, y, x| (c * 16 + y * 4 + x) as f64,
        )?;
        let small = subsample(&image, 0.5)?;
        assert_eq!(small.shape(), [2, 2, 3]);
        for c in 0..3 {
            for y in 0..2 {
                for x in 0..2 {
                    let expected = (0..2)
                        .flat_map(|dy| (0..2).map(move |dx| (2 * y + dy, 2 * x + dx)))
                        .map(|(sy, sx)| image.at(c, sy, sx))
                        .sum::<f64>()
                        / 4.0;
                    assert_relative_eq!(small.at(c, y, x), expected, epsilon = 1e-12);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn subsample_sizes() -> Result<(), ImageError> {
        let image = ImageBuffer::new(
            ImageSize {
                width: 17,
                height: 10,
            },
            3,
        )?;
        for scale in [1.0, 0.9, 0.5, 0.33, 0.25, 0.1] {
            let small = subsample(&image, scale)?;
            assert_eq!(small.size(), scaled_size(image.size(), scale));
            assert_eq!(small.num_channels(), 3);
        }
        Ok(())
    }

    #[test]
    fn subsample_unit_scale_is_identity() -> Result<(), ImageError> {
        let image = ImageBuffer::from_fn(
            ImageSize {
                width: 5,
                height: 3,
            },
            2,
            |c, y, x| (c as f64 + 1.0) * (y as f64 * 0.5 + x as f64),
        )?;
        let same = subsample(&image, 1.0)?;
        for c in 0..2 {
            for y in 0..3 {
                for x in 0..5 {
                    assert_relative_eq!(same.at(c, y, x), image.at(c, y, x));
                }
            }
        }
        Ok(())
    }

    #[test]
    fn subsample_preserves_mean() -> Result<(), ImageError> {
        // 6 -> 4 is not an integer ratio, partial samples must still average out
        let image = ImageBuffer::from_fn(
            ImageSize {
                width: 6,
                height: 6,
            },
            1,
            |_, y, x| ((y * 7 + x * 3) % 5) as f64,
        )?;
        let small = subsample(&image, 4.0 / 6.0)?;
        assert_eq!(small.size(), ImageSize { width: 4, height: 4 });

        let mean = |img: &ImageBuffer<'_>| {
            let n = (img.width() * img.height()) as f64;
            (0..img.height())
                .flat_map(|y| (0..img.width()).map(move |x| (y, x)))
                .map(|(y, x)| img.at(0, y, x))
                .sum::<f64>()
                / n
        };
        assert_relative_eq!(mean(&small), mean(&image), epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn subsample_of_view() -> Result<(), ImageError> {
        let image = ImageBuffer::from_fn(
            ImageSize {
                width: 6,
                height: 6,
            },
            1,
            |_, y, x| if y >= 2 && x >= 2 { 1.0 } else { 0.0 },
        )?;
        let view = image.view(planar_image::PixelBox {
            x1: 2,
            y1: 2,
            x2: 5,
            y2: 5,
        })?;
        let small = subsample(&view, 0.5)?;
        assert_eq!(small.shape(), [2, 2, 1]);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(small.get(0, y, x), Some(1.0));
            }
        }
        Ok(())
    }

    #[test]
    fn subsample_to_empty() -> Result<(), ImageError> {
        let image = ImageBuffer::from_channel_values(
            ImageSize {
                width: 3,
                height: 3,
            },
            &[1.0, 2.0],
        )?;
        let small = subsample(&image, 0.1)?;
        assert_eq!(small.shape(), [0, 0, 2]);
        assert!(small.is_empty());
        Ok(())
    }

    #[test]
    fn subsample_rejects_bad_scale() -> Result<(), ImageError> {
        let image = ImageBuffer::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            3,
        )?;
        for scale in [0.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                subsample(&image, scale),
                Err(ImageError::InvalidScale(..))
            ));
        }
        Ok(())
    }

    #[test]
    fn subsample_rejects_four_channels() -> Result<(), ImageError> {
        let image = ImageBuffer::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            4,
        )?;
        assert_eq!(
            subsample(&image, 0.5).err(),
            Some(ImageError::UnsupportedChannelCount(4, 3))
        );
        Ok(())
    }
}
