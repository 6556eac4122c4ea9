use std::path::Path;

use planar_image::{ImageBuffer, ImageSize, OwnedImage};

use crate::{
    draw::{draw_detections, Detection},
    error::IoError,
};

/// Convert a sample to a byte, clamping to `[0, 255]` and truncating.
#[inline]
fn sample_to_u8(value: f64) -> u8 {
    // NaN saturates to 0
    value.clamp(0.0, 255.0) as u8
}

/// Convert a planar buffer to an interleaved 8-bit RGB image.
///
/// Planes 0, 1 and 2 become the red, green and blue bytes. A single-channel buffer is
/// replicated to gray. Samples are clamped to `[0, 255]` and truncated.
///
/// # Errors
///
/// Returns an error if the buffer has neither one nor three channels or if it does
/// not fit in an image file.
///
/// # Example
///
/// ```
/// use planar_image::{ImageBuffer, ImageSize};
/// use planar_io::functional::to_rgb8;
///
/// let image = ImageBuffer::from_channel_values(
///     ImageSize { width: 2, height: 1 },
///     &[300.0, 127.9, -4.0],
/// ).unwrap();
///
/// let rgb = to_rgb8(&image).unwrap();
///
/// assert_eq!(rgb.get_pixel(1, 0).0, [255, 127, 0]);
/// ```
pub fn to_rgb8(image: &ImageBuffer<'_>) -> Result<image::RgbImage, IoError> {
    let plane = match image.num_channels() {
        1 => [0, 0, 0],
        3 => [0, 1, 2],
        n => return Err(IoError::UnsupportedChannelCount(n)),
    };

    let too_large = || IoError::ImageTooLarge(image.width(), image.height());
    let width = u32::try_from(image.width()).map_err(|_| too_large())?;
    let height = u32::try_from(image.height()).map_err(|_| too_large())?;

    Ok(image::RgbImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as usize, y as usize);
        image::Rgb(plane.map(|c| sample_to_u8(image.at(c, y, x))))
    }))
}

/// Convert an interleaved 8-bit RGB image to a three-channel planar buffer.
///
/// # Errors
///
/// Returns an error if the buffer cannot be allocated.
pub fn from_rgb8(rgb: &image::RgbImage) -> Result<OwnedImage, IoError> {
    let size = ImageSize {
        width: rgb.width() as usize,
        height: rgb.height() as usize,
    };

    let image = ImageBuffer::from_fn(size, 3, |c, y, x| {
        f64::from(rgb.get_pixel(x as u32, y as u32)[c])
    })?;

    Ok(image)
}

/// Reads an RGB image from the given file path.
///
/// The method tries to read from any image format supported by the image crate and
/// converts the pixels to 8-bit RGB before spreading them over three planes.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A three-channel image with the red, green and blue planes in that order.
pub fn read_image_rgb(file_path: impl AsRef<Path>) -> Result<OwnedImage, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?
        .into_rgb8();
    log::debug!(
        "read {}x{} image from {}",
        img.width(),
        img.height(),
        file_path.display()
    );

    from_rgb8(&img)
}

/// Writes the given image to the given file path.
///
/// The file format is deduced from the extension of the path.
///
/// # Arguments
///
/// * `file_path` - The path to the image file.
/// * `image` - The image to write, with one or three channels.
pub fn write_image_rgb(
    file_path: impl AsRef<Path>,
    image: &ImageBuffer<'_>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let rgb = to_rgb8(image)?;
    rgb.save(file_path)?;
    log::debug!("wrote {} image to {}", image.size(), file_path.display());
    Ok(())
}

/// Writes the image with the detections drawn on top of it.
///
/// See [`draw_detections`] for the overlay.
///
/// # Arguments
///
/// * `file_path` - The path to the image file.
/// * `image` - The image to draw on, with one or three channels.
/// * `detections` - The detections to draw.
pub fn write_detection_image(
    file_path: impl AsRef<Path>,
    image: &ImageBuffer<'_>,
    detections: &[Detection],
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let mut rgb = to_rgb8(image)?;
    draw_detections(&mut rgb, detections);
    rgb.save(file_path)?;
    log::debug!(
        "wrote {} detections on a {} image to {}",
        detections.len(),
        image.size(),
        file_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use planar_image::Region;

    fn gradient() -> Result<OwnedImage, IoError> {
        let image = ImageBuffer::from_fn(
            ImageSize {
                width: 16,
                height: 8,
            },
            3,
            |c, y, x| (c * 80 + y * 10 + x) as f64,
        )?;
        Ok(image)
    }

    #[test]
    fn rgb8_conversion_clamps_and_truncates() -> Result<(), IoError> {
        let image = ImageBuffer::from_planes(
            ImageSize {
                width: 1,
                height: 2,
            },
            3,
            vec![-1.0, 0.99, 254.6, 255.0, 1e9, f64::NAN],
        )?;
        let rgb = to_rgb8(&image)?;
        assert_eq!(rgb.dimensions(), (1, 2));
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 254, 255]);
        assert_eq!(rgb.get_pixel(0, 1).0, [0, 255, 0]);
        Ok(())
    }

    #[test]
    fn gray_is_replicated() -> Result<(), IoError> {
        let image = ImageBuffer::from_channel_values(
            ImageSize {
                width: 3,
                height: 2,
            },
            &[42.0],
        )?;
        let rgb = to_rgb8(&image)?;
        assert!(rgb.pixels().all(|p| p.0 == [42, 42, 42]));
        Ok(())
    }

    #[test]
    fn rgba_is_rejected() -> Result<(), IoError> {
        let image = ImageBuffer::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            4,
        )?;
        assert!(matches!(
            to_rgb8(&image),
            Err(IoError::UnsupportedChannelCount(4))
        ));
        Ok(())
    }

    #[test]
    fn rgb8_conversion_of_view() -> Result<(), IoError> {
        let image = gradient()?;
        let view = image.view(planar_image::PixelBox {
            x1: 4,
            y1: 2,
            x2: 6,
            y2: 5,
        })?;
        let rgb = to_rgb8(&view)?;
        assert_eq!(rgb.dimensions(), (3, 4));
        assert_eq!(rgb.get_pixel(2, 3).0, [56, 136, 216]);

        let back = from_rgb8(&rgb)?;
        assert_eq!(back.size(), view.size());
        assert_eq!(back.get(1, 3, 2), view.get(1, 3, 2));
        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_rgb("/definitely/not/here.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_write_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.png");

        let image = gradient()?;
        write_image_rgb(&file_path, &image)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image_rgb(&file_path)?;
        assert_eq!(image_back.shape(), [8, 16, 3]);
        assert_eq!(image_back.as_slice(), image.as_slice());
        Ok(())
    }

    #[test]
    fn write_detection_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("detections.png");

        let image = ImageBuffer::new(
            ImageSize {
                width: 32,
                height: 32,
            },
            3,
        )?;
        let detections = [Detection {
            boxes: vec![Region::new(4.0, 4.0, 20.0, 12.0)],
            score: 0.5,
            component: 0,
        }];
        write_detection_image(&file_path, &image, &detections)?;

        let image_back = read_image_rgb(&file_path)?;
        // top-left corner of the box outline is blue
        assert_eq!(image_back.get(0, 4, 4), Some(0.0));
        assert_eq!(image_back.get(2, 4, 4), Some(255.0));
        // the center dot is red
        assert_eq!(image_back.get(0, 8, 12), Some(255.0));
        assert_eq!(image_back.get(2, 8, 12), Some(0.0));
        Ok(())
    }
}
